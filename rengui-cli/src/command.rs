//! Line commands understood by the editor shell.

use once_cell::sync::Lazy;
use regex::Regex;

use rengui_model::Kind;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""((?:[^"\\]|\\.)*)"|(\S+)"#).expect("token pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Add(Kind),
    Edit(usize),
    Set { field: String, value: String },
    AddChoice { text: String, next_id: String },
    RemoveChoice(usize),
    Options(Option<String>),
    Apply,
    Cancel,
    Delete(usize),
    Answer(bool),
    Move { from: usize, to: usize },
    ShowConfig,
    SetConfig { key: String, value: String },
    Save,
    Help,
    Quit,
}

/// Splits a line into words; double quotes group words and `\"` escapes.
pub fn tokenize(line: &str) -> Vec<String> {
    TOKEN
        .captures_iter(line)
        .map(|caps| match caps.get(1) {
            Some(quoted) => quoted.as_str().replace("\\\"", "\"").replace("\\\\", "\\"),
            None => caps[2].to_string(),
        })
        .collect()
}

/// `Ok(None)` for blank lines and `#` comments.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words = tokenize(line);
    let args = &words[1..];
    let cmd = match (words[0].as_str(), args) {
        ("list" | "ls", []) => Command::List,
        ("add", [kind]) => {
            Command::Add(Kind::from_tag(kind).ok_or_else(|| format!("unknown card kind '{}'", kind))?)
        }
        ("edit", [index]) => Command::Edit(number(index)?),
        ("set", [field, rest @ ..]) => Command::Set { field: field.clone(), value: rest.join(" ") },
        ("choice", [text, next_id]) => Command::AddChoice { text: text.clone(), next_id: next_id.clone() },
        ("unchoice", [index]) => Command::RemoveChoice(number(index)?),
        ("options", []) => Command::Options(None),
        ("options", [field]) => Command::Options(Some(field.clone())),
        ("apply", []) => Command::Apply,
        ("cancel", []) => Command::Cancel,
        ("delete" | "rm", [index]) => Command::Delete(number(index)?),
        ("yes" | "y", []) => Command::Answer(true),
        ("no" | "n", []) => Command::Answer(false),
        ("move" | "mv", [from, to]) => Command::Move { from: number(from)?, to: number(to)? },
        ("config", []) => Command::ShowConfig,
        ("config", [key, rest @ ..]) if !rest.is_empty() => {
            Command::SetConfig { key: key.clone(), value: rest.join(" ") }
        }
        ("save", []) => Command::Save,
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (word, _) => return Err(format!("cannot parse '{}' (try 'help')", word)),
    };
    Ok(Some(cmd))
}

fn number(word: &str) -> Result<usize, String> {
    word.parse().map_err(|_| format!("'{}' is not a card position", word))
}

pub const HELP: &str = "\
list                      show the cards in playback order
add dialogue|video|branch append a card and start editing it
edit <n>                  edit card n
set <field> <value>       change a field of the card being edited
choice <text> <sceneId>   add a branch choice
unchoice <n>              remove branch choice n
options [field]           show selectable assets
apply | cancel            finish the edit
delete <n>                ask to delete card n, answer with yes | no
move <from> <to>          move a card
config [key value]        show or change the game settings
save                      write the story
quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(tokenize(r#"set text "Hello, world." "#), vec!["set", "text", "Hello, world."]);
        assert_eq!(tokenize(r#"set text "say \"hi\"""#), vec!["set", "text", "say \"hi\""]);
        assert_eq!(tokenize(r#"set text """#), vec!["set", "text", ""]);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("  # comment").unwrap(), None);
        assert_eq!(parse("add Video").unwrap(), Some(Command::Add(Kind::Video)));
        assert_eq!(parse("mv 2 0").unwrap(), Some(Command::Move { from: 2, to: 0 }));
        assert_eq!(
            parse("set condition love >= 100").unwrap(),
            Some(Command::Set { field: "condition".into(), value: "love >= 100".into() })
        );
        assert_eq!(
            parse(r#"config title "Moonlit Road""#).unwrap(),
            Some(Command::SetConfig { key: "title".into(), value: "Moonlit Road".into() })
        );
        assert_eq!(parse("config").unwrap(), Some(Command::ShowConfig));
        assert!(parse("add cutscene").is_err());
        assert!(parse("edit first").is_err());
        assert!(parse("dance").is_err());
    }
}
