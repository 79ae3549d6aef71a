#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Home,
    Work,
    Blog,
    Contact,
    Open(String),
    Location(String),
    Back,
    Forward,
    Theme,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.strip_prefix(':').unwrap_or(input).trim();

    if input.is_empty() {
        return None;
    }

    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    };

    match cmd {
        "home" => Some(Command::Home),
        "work" | "w" => Some(Command::Work),
        "blog" | "b" => Some(Command::Blog),
        "contact" | "c" => Some(Command::Contact),
        "open" | "o" if !args.is_empty() => Some(Command::Open(args.to_owned())),
        "location" | "loc" if !args.is_empty() => Some(Command::Location(args.to_owned())),
        "back" => Some(Command::Back),
        "forward" | "fwd" => Some(Command::Forward),
        "theme" | "t" => Some(Command::Theme),
        "help" | "h" => Some(Command::Help),
        "quit" | "q" => Some(Command::Quit),
        _ => None,
    }
}
