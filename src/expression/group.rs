// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tree of capturing groups of a regular expression.

use regex::Captures;

/// Capturing group of a regular expression, derived from its source.
///
/// Non-capturing groups (`(?:…)`, look-arounds, flag groups) don't appear in
/// the tree: their capturing groups are attached to the nearest capturing
/// ancestor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupBuilder {
    /// Index of this group in [`Captures`]. The root has index `0`.
    index: usize,

    /// Byte offset in the regular expression where the group's inner source
    /// starts.
    start: usize,

    /// Byte offset in the regular expression where the group's inner source
    /// ends.
    end: usize,

    /// Inner source of this group, without parentheses and name.
    source: String,

    /// Directly nested capturing groups.
    children: Vec<GroupBuilder>,
}

/// Frame of a group being parsed.
struct Frame {
    /// Capture index, if the group is capturing.
    index: Option<usize>,

    /// Offset of the group's inner source.
    start: usize,

    /// Capturing groups parsed so far.
    children: Vec<GroupBuilder>,
}

impl GroupBuilder {
    /// Derives the [`GroupBuilder`] tree of the given regular expression
    /// source.
    ///
    /// The source is expected to be a valid regular expression.
    #[must_use]
    pub fn parse(regex: &str) -> Self {
        let mut stack = vec![Frame { index: Some(0), start: 0, children: vec![] }];
        let mut next_index = 1;
        let mut class_depth = 0_usize;
        let mut chars = regex.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    _ = chars.next();
                }
                '[' => {
                    class_depth += 1;
                    // `]` right after the opening bracket is a literal.
                    _ = chars.next_if(|&(_, c)| c == '^');
                    _ = chars.next_if(|&(_, c)| c == ']');
                }
                ']' if class_depth > 0 => class_depth -= 1,
                _ if class_depth > 0 => {}
                '(' => {
                    let rest = &regex[i + 1..];
                    let frame = if let Some(name_len) = group_name_len(rest) {
                        let index = next_index;
                        next_index += 1;
                        for _ in rest[..name_len].chars() {
                            _ = chars.next();
                        }
                        Frame {
                            index: Some(index),
                            start: i + 1 + name_len,
                            children: vec![],
                        }
                    } else if rest.starts_with('?') {
                        Frame { index: None, start: i + 1, children: vec![] }
                    } else {
                        let index = next_index;
                        next_index += 1;
                        Frame { index: Some(index), start: i + 1, children: vec![] }
                    };
                    stack.push(frame);
                }
                ')' if stack.len() > 1 => {
                    if let Some(frame) = stack.pop() {
                        close(&mut stack, frame, regex, i);
                    }
                }
                _ => {}
            }
        }

        while stack.len() > 1 {
            if let Some(frame) = stack.pop() {
                close(&mut stack, frame, regex, regex.len());
            }
        }
        let children =
            stack.pop().map(|root| root.children).unwrap_or_default();
        Self {
            index: 0,
            start: 0,
            end: regex.len(),
            source: regex.to_owned(),
            children,
        }
    }

    /// Returns the index of this group in [`Captures`].
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the inner source of this group.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the byte range of this group's inner source in the regular
    /// expression it was parsed from.
    #[must_use]
    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Returns the directly nested capturing groups.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Builds the [`Group`] tree out of the given [`Captures`].
    #[must_use]
    pub fn build(&self, captures: &Captures<'_>) -> Group {
        let matched = captures.get(self.index);
        Group {
            value: matched.map(|m| m.as_str().to_owned()),
            span: matched.map(|m| (m.start(), m.end())),
            children: self.children.iter().map(|c| c.build(captures)).collect(),
        }
    }
}

/// Pops the given `frame` into its parent on the `stack`.
fn close(stack: &mut [Frame], frame: Frame, regex: &str, end: usize) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let Some(index) = frame.index {
        parent.children.push(GroupBuilder {
            index,
            start: frame.start,
            end,
            source: regex[frame.start..end].to_owned(),
            children: frame.children,
        });
    } else {
        parent.children.extend(frame.children);
    }
}

/// Returns the length of the `?P<name>` or `?<name>` prefix, if `rest`
/// (following an opening parenthesis) starts a named group.
fn group_name_len(rest: &str) -> Option<usize> {
    let name = rest
        .strip_prefix("?P<")
        .or_else(|| rest.strip_prefix("?<"))
        .filter(|n| !n.starts_with(['=', '!']))?;
    let close = name.find('>')?;
    Some(rest.len() - name.len() + close + 1)
}

/// Value captured by a group of a regular expression, with the values of its
/// nested capturing groups.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Group {
    /// Captured text, if the group participated in the match.
    value: Option<String>,

    /// Byte range of the captured text.
    span: Option<(usize, usize)>,

    /// Nested capturing groups.
    children: Vec<Group>,
}

impl Group {
    /// Creates a [`Group`] of the given value without nested groups.
    #[must_use]
    pub fn new(value: Option<String>, span: Option<(usize, usize)>) -> Self {
        Self { value, span, children: vec![] }
    }

    /// Returns the captured text, if the group participated in the match.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the byte range of the captured text.
    #[must_use]
    pub const fn span(&self) -> Option<(usize, usize)> {
        self.span
    }

    /// Returns the nested capturing groups.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Consumes this [`Group`] returning its nested capturing groups.
    #[must_use]
    pub fn into_children(self) -> Vec<Self> {
        self.children
    }

    /// Returns the values to transform: the ones of the nested groups, or the
    /// own value if there are none.
    #[must_use]
    pub fn values(&self) -> Vec<Option<&str>> {
        if self.children.is_empty() {
            vec![self.value()]
        } else {
            self.children.iter().map(Self::value).collect()
        }
    }
}
