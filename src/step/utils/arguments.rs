//! Ordered command-line argument vector.

use super::tokenize::tokenize;
use std::fmt;

/// Ordered list of process arguments, executable first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgumentList {
    args: Vec<String>,
}

impl ArgumentList {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one argument as-is.
    pub fn add(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Appends each argument as-is.
    pub fn add_all<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Splits `s` with [`tokenize`] and appends every token.
    pub fn add_tokenized(&mut self, s: &str) -> &mut Self {
        self.args.extend(tokenize(s));
        self
    }

    /// Inserts `args` before the current first argument, keeping their order.
    pub fn prepend<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut head: Vec<String> = args.into_iter().map(Into::into).collect();
        head.append(&mut self.args);
        self.args = head;
        self
    }

    /// Returns the arguments as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    /// Splits into the program and its arguments.
    pub fn split_program(&self) -> Option<(&str, &[String])> {
        self.args
            .split_first()
            .map(|(program, rest)| (program.as_str(), rest))
    }

    /// Returns the number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns `true` when no argument has been added.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Renders the list for display, double-quoting empty arguments and
    /// arguments that contain a space.
    pub fn to_string_with_quote(&self) -> String {
        self.args
            .iter()
            .map(|arg| {
                if arg.is_empty() || arg.contains(' ') {
                    format!("\"{arg}\"")
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_quote())
    }
}

impl From<ArgumentList> for Vec<String> {
    fn from(list: ArgumentList) -> Self {
        list.args
    }
}
