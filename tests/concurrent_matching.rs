use std::sync::Arc;

use cucumber_types::{Expression as _, ParameterType, TypeRegistry};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shares_populated_registry_across_tasks() {
    let mut registry = TypeRegistry::default();
    registry
        .define_parameter_type(ParameterType::new(
            "fruit",
            "apple|pear",
            |s: Option<&str>| Ok(s.unwrap_or_default().to_uppercase()),
        ))
        .unwrap();
    let registry = Arc::new(registry);
    let step = Arc::new(
        registry.step_expression("{int} {fruit}(s) in basket {word}").unwrap(),
    );

    let tasks = (0..32)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let step = Arc::clone(&step);
            tokio::spawn(async move {
                let fruit = if i % 2 == 0 { "apple" } else { "pear" };
                let args = step
                    .match_text(&format!("{i} {fruit}s in basket b{i}"))
                    .unwrap();
                let count = args[0].transform_into::<i32>().unwrap();
                let fruit = args[1].transform_into::<String>().unwrap();
                let basket = args[2].transform_into::<String>().unwrap();

                let own = registry.step_expression("basket {word}").unwrap();
                assert!(own.match_text(&format!("basket {basket}")).is_some());

                (count, fruit, basket)
            })
        })
        .collect::<Vec<_>>();

    for (i, task) in tasks.into_iter().enumerate() {
        let (count, fruit, basket) = task.await.unwrap();
        assert_eq!(usize::try_from(count).unwrap(), i);
        assert_eq!(fruit, if i % 2 == 0 { "APPLE" } else { "PEAR" });
        assert_eq!(basket, format!("b{i}"));
    }
}
