//! Quote-aware whitespace tokenizer for free-form command-line arguments.

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Between,
    Bare,
    Single,
    Double,
}

/// Split `s` into arguments on whitespace.
///
/// Single and double quotes group text containing whitespace and are removed
/// from the result. Quoted and unquoted runs that touch form one argument, so
/// `/DNAME="My App"` yields `/DNAME=My App`. Inside double quotes a backslash
/// escapes only a following backslash, quote or space; any other backslash is
/// kept as written, so quoted Windows paths survive untouched. An empty
/// quoted string produces an empty argument.
pub fn tokenize(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = State::Between;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Between | State::Bare => match c {
                c if c.is_whitespace() => {
                    if state == State::Bare {
                        tokens.push(std::mem::take(&mut current));
                        state = State::Between;
                    }
                }
                '\'' => state = State::Single,
                '"' => state = State::Double,
                c => {
                    current.push(c);
                    state = State::Bare;
                }
            },
            State::Single => match c {
                '\'' => state = State::Bare,
                c => current.push(c),
            },
            State::Double => match c {
                '"' => state = State::Bare,
                '\\' => match chars.next_if(|&next| is_escapable(next)) {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                },
                c => current.push(c),
            },
        }
    }

    // An unterminated quote still yields what was collected.
    if state != State::Between {
        tokens.push(current);
    }

    tokens
}

fn is_escapable(c: char) -> bool {
    matches!(c, '\\' | '"' | '\'' | ' ')
}
