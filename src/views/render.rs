//! Transcript renderers: legacy HTML markup, ANSI terminal, plain text.

use crate::shell::help::{HELP_COMMANDS, HELP_USAGE};
use crate::tree::EntryKind;
use crate::views::{ListingEntry, ResponseBody, Transcript};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Output format of a [`Renderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Plain,
    #[default]
    Ansi,
    Html,
}

/// Whether file content and other tree-derived output is passed through verbatim.
///
/// `Trusted` reproduces the legacy behavior: only the echoed command is
/// escaped. `Escaped` also escapes markup (html) or strips control
/// characters (terminal modes) in everything that comes from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentTrust {
    #[default]
    Trusted,
    Escaped,
}

/// Renders transcript entries to text
#[derive(Debug, Clone)]
pub struct Renderer {
    mode: RenderMode,
    trust: ContentTrust,
    prompt: String,
}

impl Renderer {
    pub fn new(mode: RenderMode, trust: ContentTrust, prompt: impl Into<String>) -> Self {
        Self {
            mode,
            trust,
            prompt: prompt.into(),
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn render(&self, entry: &Transcript) -> String {
        match self.mode {
            RenderMode::Html => self.render_html(entry),
            RenderMode::Ansi | RenderMode::Plain => self.render_text(entry),
        }
    }

    /// Escape sequence that clears the screen, if the mode has one.
    pub fn clear_sequence(&self) -> Option<&'static str> {
        match self.mode {
            RenderMode::Ansi => Some("\x1b[2J\x1b[H"),
            RenderMode::Plain | RenderMode::Html => None,
        }
    }

    fn render_html(&self, entry: &Transcript) -> String {
        format!(
            "<p class=\"line\">{}<span class=\"green\">{}</span> {}</p>\n<p class=\"line\">{}</p>\n",
            escape_markup(&entry.prompt_path),
            escape_markup(&self.prompt),
            escape_markup(&entry.command),
            self.html_body(&entry.body)
        )
    }

    fn html_body(&self, body: &ResponseBody) -> String {
        match body {
            ResponseBody::Blank => String::new(),
            ResponseBody::Text(text) => self.html_content(text).into_owned(),
            ResponseBody::Help => help_html(),
            ResponseBody::Listing(entries) => {
                let items: Vec<String> = entries
                    .iter()
                    .map(|entry| {
                        let name = self.html_content(&entry.name);
                        match entry.kind {
                            EntryKind::Folder => {
                                format!("<li> <span class=\"folder\">{}/</span></li>", name)
                            }
                            EntryKind::Executable => {
                                format!("<li> <span class=\"executable\">{}</span></li>", name)
                            }
                            EntryKind::Plain => {
                                format!("<li> <span class=\"file\">{}</span></li>", name)
                            }
                        }
                    })
                    .collect();
                format!("<ul>{}</ul>", items.join(" "))
            }
            ResponseBody::Matches(matches) => {
                let listing = format!("Possible matches:\n{}", matches.join("\n"));
                self.html_content(&listing).into_owned()
            }
            ResponseBody::Error(err) => format!(
                "<span class=\"error\">Error: {}</span>",
                self.html_content(&err.to_string())
            ),
        }
    }

    fn html_content<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.trust {
            ContentTrust::Trusted => Cow::Borrowed(text),
            ContentTrust::Escaped => Cow::Owned(escape_markup(text)),
        }
    }

    fn render_text(&self, entry: &Transcript) -> String {
        let command = strip_control(&entry.command);
        let mut out = if self.mode == RenderMode::Ansi {
            format!(
                "{}{} {}\n",
                entry.prompt_path.blue(),
                self.prompt.green(),
                command
            )
        } else {
            format!("{}{} {}\n", entry.prompt_path, self.prompt, command)
        };
        let body = self.text_body(&entry.body);
        if !body.is_empty() {
            out.push_str(&body);
            if !body.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }

    fn text_body(&self, body: &ResponseBody) -> String {
        let ansi = self.mode == RenderMode::Ansi;
        match body {
            ResponseBody::Blank => String::new(),
            ResponseBody::Text(text) => self.text_content(text).into_owned(),
            ResponseBody::Help => help_text(ansi),
            ResponseBody::Listing(entries) => entries
                .iter()
                .map(|entry| self.listing_item(entry))
                .collect::<Vec<_>>()
                .join("  "),
            ResponseBody::Matches(matches) => {
                let listing = format!("Possible matches:\n{}", matches.join("\n"));
                self.text_content(&listing).into_owned()
            }
            ResponseBody::Error(err) => {
                let message = format!("Error: {}", self.text_content(&err.to_string()));
                if ansi {
                    message.red().to_string()
                } else {
                    message
                }
            }
        }
    }

    fn listing_item(&self, entry: &ListingEntry) -> String {
        let name = self.text_content(&entry.name);
        match (entry.kind, self.mode == RenderMode::Ansi) {
            (EntryKind::Folder, true) => format!("{}/", name).blue().bold().to_string(),
            (EntryKind::Folder, false) => format!("{}/", name),
            (EntryKind::Executable, true) => name.green().to_string(),
            (EntryKind::Executable, false) | (EntryKind::Plain, _) => name.into_owned(),
        }
    }

    fn text_content<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.trust {
            ContentTrust::Trusted => Cow::Borrowed(text),
            ContentTrust::Escaped => Cow::Owned(strip_control(text)),
        }
    }
}

/// Escape markup-significant characters.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drop control characters other than newline and tab.
fn strip_control(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

fn help_html() -> String {
    let mut out = String::from("<div class=\"cli-help\">\n        <pre>\n");
    out.push_str(
        "Usage: [[<span class=\"command\">command</span>] [<span class=\"command\">argument</span>]]\n\nCommands:\n",
    );
    for (name, description) in HELP_COMMANDS {
        out.push_str(&format!(
            "  <span class=\"command\">{}</span>{:pad$}{}\n",
            name,
            "",
            description,
            pad = 10 - name.len()
        ));
    }
    out.push_str("        </pre>\n    </div>");
    out
}

fn help_text(ansi: bool) -> String {
    let mut out = format!("{}\n\nCommands:\n", HELP_USAGE);
    for (name, description) in HELP_COMMANDS {
        let padded = format!("{:<10}", name);
        if ansi {
            out.push_str(&format!("  {}{}\n", padded.cyan(), description));
        } else {
            out.push_str(&format!("  {}{}\n", padded, description));
        }
    }
    out
}
