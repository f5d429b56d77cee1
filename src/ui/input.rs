use crate::message::Section;

#[derive(Default, Debug, PartialEq, Eq)]
pub enum Command {
    #[default]
    NoOp,
    Next,
    Joke,
    Goto(Section),
}

pub fn parse(s: &str) -> Command {
    let mut parts = s.split_whitespace();
    match parts.next() {
        // submitting an empty input box is the "Next" button
        None | Some("/next") => Command::Next,
        Some("/joke") => Command::Joke,
        Some("/goto") => parts
            .next()
            .and_then(Section::from_anchor)
            .map(Command::Goto)
            .unwrap_or_default(),
        Some(anchor) if anchor.starts_with('#') => Section::from_anchor(anchor)
            .map(Command::Goto)
            .unwrap_or_default(),
        _ => Command::NoOp,
    }
}

#[cfg(test)]
mod tests {
    use crate::{message::Section, ui::input::Command};

    use super::parse;

    #[test]
    fn parses_next() {
        assert_eq!(parse("/next"), Command::Next);
        assert_eq!(parse(""), Command::Next);
        assert_eq!(parse("   "), Command::Next);
    }

    #[test]
    fn parses_goto() {
        assert_eq!(parse("/goto #contact"), Command::Goto(Section::Contact));
        assert_eq!(parse("/goto services"), Command::Goto(Section::Services));
        assert_eq!(parse("#about"), Command::Goto(Section::About));
        assert_eq!(parse("/goto"), Command::NoOp);
        assert_eq!(parse("#nowhere"), Command::NoOp);
    }

    #[test]
    fn parses_joke() {
        assert_eq!(parse("/joke please"), Command::Joke);
    }

    #[test]
    fn parses_no_op() {
        let input = "something";
        assert_eq!(parse(input), Command::NoOp)
    }
}
