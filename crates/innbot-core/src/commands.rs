//! Command parsing and the fixed reply texts.

use crate::{
    config::Links,
    lookup::{LookupOutcome, Party},
};

pub const GREETING: &str =
    "Привет! Я бот для поиска компаний по введенному ИНН. Введите /help для отображения списка команд.";

pub const HELP: &str = "/start – начать общение\n\
/help – справка о доступных командах\n\
/hello – информация обо мне\n\
/inn [ИНН] или\n\
/inn [ИНН1 ... ИННn] – поиск компаний по ИНН\n\
/last – повтор последнего действия";

pub const INN_USAGE: &str = "Укажите хотя бы один ИНН, например:\n\
/inn 7707083893\n\
или несколько ИНН, например:\n\
/inn 7707083893 7731457980";

pub const LOOKUP_FAILED: &str = "Ошибка при запросе";
pub const NO_PREVIOUS_ACTION: &str = "Нет предыдущего действия.";
pub const UNKNOWN_COMMAND: &str =
    "Неизвестная команда. Введите /help для отображения списка команд.";
pub const NOT_A_COMMAND: &str = "Это не команда. Введите /help для отображения списка команд.";

const FOUND_MARK: &str = "\u{2705}\u{fe0f}";
const NOT_FOUND_MARK: &str = "\u{274c}\u{fe0f}";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Hello,
    /// `/inn` with zero or more tax ids.
    Inn(Vec<String>),
    Last,
    Unknown,
    NotACommand,
}

impl Command {
    /// Parse a raw message. Matching is case-sensitive.
    ///
    /// A trailing `@botname` on the first token is ignored (group chats).
    /// `/start`, `/help`, `/hello` and `/last` must stand alone; anything whose
    /// first token begins with `/inn` is an `/inn` request.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        if !text.starts_with('/') {
            return Command::NotACommand;
        }

        let mut tokens = text.split_whitespace();
        let head = tokens.next().unwrap_or("");
        let head = head.split_once('@').map_or(head, |(cmd, _bot)| cmd);
        let args: Vec<String> = tokens.map(str::to_string).collect();

        match head {
            "/start" if args.is_empty() => Command::Start,
            "/help" if args.is_empty() => Command::Help,
            "/hello" if args.is_empty() => Command::Hello,
            "/last" if args.is_empty() => Command::Last,
            h if h.starts_with("/inn") => Command::Inn(args),
            _ => Command::Unknown,
        }
    }
}

pub fn hello_text(links: &Links) -> String {
    format!(
        "Фамилия, имя: Директоров Виктор\n\
Email: direktorov.v.d@gmail.com\n\
GitHub: {}\n\
Резюме на hh: {}",
        links.link_github, links.resume_hh
    )
}

fn render_found(party: &Party, name: &str) -> String {
    format!(
        "{FOUND_MARK} ИНН: {}\n🏢 {}\n📍 {}\n",
        party.inn,
        name,
        party.address.as_deref().unwrap_or("")
    )
}

fn render_not_found(inn: &str) -> String {
    format!("{NOT_FOUND_MARK} ИНН: {inn}\n🏢 Компании с таким ИНН не существует\n")
}

/// One block per outcome, in the given order, separated by a blank line.
///
/// A party without a name renders like a not-found line for its canonical id.
pub fn render_outcomes(outcomes: &[LookupOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| match o {
            LookupOutcome::Found(p) => match p.name.as_deref() {
                Some(name) => render_found(p, name),
                None => render_not_found(&p.inn),
            },
            LookupOutcome::NotFound(inn) => render_not_found(inn),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn error_text(message: &str) -> String {
    format!("Произошла ошибка: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_commands() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("  /help \n"), Command::Help);
        assert_eq!(Command::parse("/hello"), Command::Hello);
        assert_eq!(Command::parse("/last"), Command::Last);
        assert_eq!(Command::parse("/help@inn_lookup_bot"), Command::Help);
    }

    #[test]
    fn fixed_commands_do_not_take_arguments() {
        assert_eq!(Command::parse("/start now"), Command::Unknown);
        assert_eq!(Command::parse("/last 2"), Command::Unknown);
        assert_eq!(Command::parse("/Start"), Command::Unknown);
        assert_eq!(Command::parse("/starting"), Command::Unknown);
    }

    #[test]
    fn parses_inn_arguments() {
        assert_eq!(Command::parse("/inn"), Command::Inn(vec![]));
        assert_eq!(
            Command::parse("/inn 7707083893   7731457980"),
            Command::Inn(vec!["7707083893".to_string(), "7731457980".to_string()])
        );
        assert_eq!(
            Command::parse("/inn\t1\n2"),
            Command::Inn(vec!["1".to_string(), "2".to_string()])
        );
        assert_eq!(
            Command::parse("/inn@inn_lookup_bot 1"),
            Command::Inn(vec!["1".to_string()])
        );
        // Prefix match: the first token is always the command itself.
        assert_eq!(
            Command::parse("/innfoo 123"),
            Command::Inn(vec!["123".to_string()])
        );
    }

    #[test]
    fn classifies_everything_else() {
        assert_eq!(Command::parse("/nope"), Command::Unknown);
        assert_eq!(Command::parse("/"), Command::Unknown);
        assert_eq!(Command::parse("hello"), Command::NotACommand);
        assert_eq!(Command::parse("   "), Command::NotACommand);
        assert_eq!(Command::parse("inn 123"), Command::NotACommand);
    }

    #[test]
    fn renders_not_found_block_exactly() {
        let out = render_outcomes(&[LookupOutcome::NotFound("0000000000".to_string())]);
        assert_eq!(
            out,
            "\u{274c}\u{fe0f} ИНН: 0000000000\n🏢 Компании с таким ИНН не существует\n"
        );
    }

    #[test]
    fn renders_found_block_and_blank_line_between() {
        let out = render_outcomes(&[
            LookupOutcome::Found(Party {
                inn: "7707083893".to_string(),
                name: Some("ПАО СБЕРБАНК".to_string()),
                address: Some("г Москва, ул Вавилова, д 19".to_string()),
            }),
            LookupOutcome::NotFound("1".to_string()),
        ]);
        assert_eq!(
            out,
            "\u{2705}\u{fe0f} ИНН: 7707083893\n🏢 ПАО СБЕРБАНК\n📍 г Москва, ул Вавилова, д 19\n\
             \n\u{274c}\u{fe0f} ИНН: 1\n🏢 Компании с таким ИНН не существует\n"
        );
    }

    #[test]
    fn hello_interpolates_links() {
        let text = hello_text(&Links {
            link_github: "https://github.com/someone".to_string(),
            resume_hh: "https://hh.ru/resume/abc".to_string(),
        });
        assert!(text.contains("GitHub: https://github.com/someone"));
        assert!(text.ends_with("Резюме на hh: https://hh.ru/resume/abc"));
    }
}
