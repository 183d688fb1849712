/// One line typed at the `search>` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Plain text: type it, then press Enter.
    Search(String),
    /// Type without committing; only the spelling timer runs.
    Spell(String),
    Node(String),
    Tag(String),
    Page(usize),
    Tagged(String),
    Accept,
    Docs,
    Graph,
    Back,
    Forward,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(input: &str) -> Option<Line> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if !input.starts_with('/') {
        return Some(Line::Search(input.to_string()));
    }

    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };
    let line = match (command, rest) {
        ("/help" | "/h", _) => Line::Help,
        ("/quit" | "/q", _) => Line::Quit,
        ("/accept" | "/a", _) => Line::Accept,
        ("/docs" | "/d", _) => Line::Docs,
        ("/graph" | "/g", _) => Line::Graph,
        ("/back" | "/b", _) => Line::Back,
        ("/forward" | "/f", _) => Line::Forward,
        ("/node" | "/n", id) if !id.is_empty() => Line::Node(id.to_string()),
        ("/tag" | "/t", tag) if !tag.is_empty() => Line::Tag(tag.to_string()),
        ("/tagged", id) if !id.is_empty() => Line::Tagged(id.to_string()),
        ("/spell" | "/s", text) if !text.is_empty() => Line::Spell(text.to_string()),
        ("/page" | "/p", n) => match n.parse::<usize>() {
            Ok(page) if page > 0 => Line::Page(page),
            _ => Line::Invalid("/page requires a page number".to_string()),
        },
        ("/node" | "/n" | "/tag" | "/t" | "/tagged" | "/spell" | "/s", _) => {
            Line::Invalid(format!("{command} requires an argument"))
        }
        _ => Line::Invalid(format!("unknown command: {command}")),
    };
    Some(line)
}

pub fn show_help() {
    println!("🎯 Commands:");
    println!("  <query>          Search (and plot the graph shortly after)");
    println!("  /spell <text>    Type without searching; a suggestion may appear");
    println!("  /accept, /a      Search for the shown suggestion");
    println!("  /node <id>       Narrow the query to a graph node");
    println!("  /tag <tag>       Add a tag to the query");
    println!("  /tagged <id>     Documents on this page tagged with a node");
    println!("  /page <n>        Go to a result page");
    println!("  /docs, /d        Show the current page again");
    println!("  /graph, /g       Show the graph");
    println!("  /back, /forward  Move through history");
    println!("  /help, /h        Show this help");
    println!("  /quit, /q        Exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_search() {
        assert_eq!(parse_line("  neural nets "), Some(Line::Search("neural nets".to_string())));
        assert_eq!(parse_line("   "), None);
    }

    #[test]
    fn commands_take_the_rest_of_the_line() {
        assert_eq!(parse_line("/node machine learning"), Some(Line::Node("machine learning".to_string())));
        assert_eq!(parse_line("/t vision"), Some(Line::Tag("vision".to_string())));
        assert_eq!(parse_line("/page 3"), Some(Line::Page(3)));
        assert_eq!(parse_line("/q"), Some(Line::Quit));
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(matches!(parse_line("/page zero"), Some(Line::Invalid(_))));
        assert!(matches!(parse_line("/page 0"), Some(Line::Invalid(_))));
        assert!(matches!(parse_line("/node"), Some(Line::Invalid(_))));
        assert!(matches!(parse_line("/bogus"), Some(Line::Invalid(_))));
    }
}
