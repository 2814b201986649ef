use recall_lib::flashcards::{Card, CardType};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

fn type_color(card_type: CardType) -> &'static str {
    match card_type {
        CardType::Definition => Color::CYAN,
        CardType::Qa => Color::GREEN,
        CardType::Cloze => Color::YELLOW,
    }
}

/// Collapse newlines so a card side fits on one line
pub fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a card as a short block: id and type, front, back, source
pub fn render_card(card: &Card, use_color: bool) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {}",
        paint(&card.id, Color::BOLD, use_color),
        paint(&format!("[{}]", card.card_type), type_color(card.card_type), use_color),
    ));
    lines.push(format!("  Q: {}", one_line(&card.front)));
    lines.push(format!("  A: {}", one_line(&card.back)));

    if let Some(source) = card.first_source() {
        let mut meta = source.path.clone();
        if !card.tags.is_empty() {
            let tags = card.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ");
            meta = format!("{}  {}", meta, tags);
        }
        lines.push(format!("  {}", paint(&meta, Color::DIM, use_color)));
    }

    lines.join("\n")
}
