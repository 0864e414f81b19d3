//! Finite-state machine that turns parse events into groups.
//!
//! Every event goes through [`Machine::dispatch`], which consumes the current
//! state and either produces the next one or rejects the event. Illegal
//! nesting, missing attributes and unknown codes are errors, never skipped.

use super::events::{Element, Event, Position};
use super::grammar::{CONTENT, GROUP, LANG, TEXT};
use super::GroupMap;
use crate::codes::{Country, Language};
use crate::error::{ResourceError, Result};
use crate::group::Group;

/// A `group` element being read.
#[derive(Debug)]
struct GroupFrame {
    name: String,
    texts: usize,
}

/// A `text` element being read.
#[derive(Debug)]
struct TextFrame {
    group: GroupFrame,
    id: String,
    country: Option<Country>,
    langs: usize,
}

/// A `lang` element being read.
#[derive(Debug)]
struct LangFrame {
    text: TextFrame,
    language: Language,
    country: Option<Country>,
    buffer: String,
}

#[derive(Debug)]
enum State {
    /// Before the root element.
    Prolog,
    /// Inside `content`, between groups.
    Outside,
    InGroup(GroupFrame),
    InText(TextFrame),
    InLang(LangFrame),
    /// After the root element closed.
    Finished,
}

impl State {
    fn element(&self) -> &'static str {
        match self {
            Self::Prolog | Self::Finished => "document",
            Self::Outside => CONTENT,
            Self::InGroup(_) => GROUP,
            Self::InText(_) => TEXT,
            Self::InLang(_) => LANG,
        }
    }
}

/// Event-driven builder of one document's groups.
#[derive(Debug)]
pub struct Machine {
    state: State,
    groups: GroupMap,
    groups_seen: usize,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Create a machine in the initial state with an empty working set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Prolog,
            groups: GroupMap::new(),
            groups_seen: 0,
        }
    }

    /// Feed one event to the machine.
    pub fn dispatch(&mut self, event: Event<'_>, position: Position) -> Result<()> {
        let state = std::mem::replace(&mut self.state, State::Finished);
        let next = match event {
            Event::Start(element) => self.on_start(state, &element),
            Event::Text(text) => on_text(state, text),
            Event::End(name) => self.on_end(state, name),
        };
        self.state = next.map_err(|message| ResourceError::Schema {
            line: position.line,
            column: position.column,
            message,
        })?;
        Ok(())
    }

    /// Finish the parse and hand out the completed working set.
    pub fn finish(self) -> Result<GroupMap> {
        match self.state {
            State::Finished => Ok(self.groups),
            state => Err(ResourceError::Schema {
                line: 0,
                column: 0,
                message: format!("document ended inside <{}>", state.element()),
            }),
        }
    }

    fn on_start(
        &mut self,
        state: State,
        element: &Element<'_>,
    ) -> std::result::Result<State, String> {
        if let Some(namespace) = element.namespace {
            return Err(format!(
                "<{}> is in namespace '{namespace}', resource elements have none",
                element.name
            ));
        }
        match (state, element.name) {
            (State::Prolog, CONTENT) => {
                check_attributes(element, &[])?;
                Ok(State::Outside)
            }
            (State::Prolog, other) => Err(format!(
                "root element must be <{CONTENT}>, found <{other}>"
            )),
            (State::Outside, GROUP) => {
                check_attributes(element, &["name"])?;
                let name = required(element, "name")?;
                // Two group elements with the same name fill one group.
                self.groups
                    .entry(name.to_string())
                    .or_insert_with(|| Group::new(name));
                Ok(State::InGroup(GroupFrame {
                    name: name.to_string(),
                    texts: 0,
                }))
            }
            (State::InGroup(group), TEXT) => {
                check_attributes(element, &["id", "country"])?;
                let id = required(element, "id")?;
                let country = optional_country(element)?;
                Ok(State::InText(TextFrame {
                    group,
                    id: id.to_string(),
                    country,
                    langs: 0,
                }))
            }
            (State::InText(text), LANG) => {
                check_attributes(element, &["id", "country"])?;
                let language = required(element, "id")?
                    .parse::<Language>()
                    .map_err(|e| e.to_string())?;
                let country = optional_country(element)?;
                Ok(State::InLang(LangFrame {
                    text,
                    language,
                    country,
                    buffer: String::new(),
                }))
            }
            (State::InLang(_), other) => Err(format!(
                "<{LANG}> contains only character data, found <{other}>"
            )),
            (state, other) => Err(format!(
                "unexpected <{other}> in <{}>, expected <{}>",
                state.element(),
                expected_child(&state)
            )),
        }
    }

    fn on_end(&mut self, state: State, name: &str) -> std::result::Result<State, String> {
        match (state, name) {
            (State::Outside, CONTENT) => {
                if self.groups_seen == 0 {
                    return Err(format!("<{CONTENT}> requires at least one <{GROUP}>"));
                }
                Ok(State::Finished)
            }
            (State::InGroup(group), GROUP) => {
                if group.texts == 0 {
                    return Err(format!(
                        "<{GROUP} name=\"{}\"> requires at least one <{TEXT}>",
                        group.name
                    ));
                }
                self.groups_seen += 1;
                Ok(State::Outside)
            }
            (State::InText(mut text), TEXT) => {
                if text.langs == 0 {
                    return Err(format!(
                        "<{TEXT} id=\"{}\"> requires at least one <{LANG}>",
                        text.id
                    ));
                }
                text.group.texts += 1;
                Ok(State::InGroup(text.group))
            }
            (State::InLang(lang), LANG) => {
                let LangFrame {
                    mut text,
                    language,
                    country,
                    buffer,
                } = lang;
                let group = self
                    .groups
                    .get_mut(&text.group.name)
                    .ok_or_else(|| format!("group '{}' was never opened", text.group.name))?;
                if language.is_system() {
                    group.put_system(&text.id, buffer);
                } else {
                    group.put(language, country.or(text.country), &text.id, buffer);
                }
                text.langs += 1;
                Ok(State::InText(text))
            }
            (state, other) => Err(format!(
                "unexpected </{other}> in <{}>",
                state.element()
            )),
        }
    }
}

fn on_text(state: State, text: &str) -> std::result::Result<State, String> {
    match state {
        State::InLang(mut lang) => {
            lang.buffer.push_str(text);
            Ok(State::InLang(lang))
        }
        state if text.trim().is_empty() => Ok(state),
        state => Err(format!(
            "character data is only allowed in <{LANG}>, found '{}' in <{}>",
            text.trim(),
            state.element()
        )),
    }
}

fn expected_child(state: &State) -> &'static str {
    match state {
        State::Prolog => CONTENT,
        State::Outside => GROUP,
        State::InGroup(_) => TEXT,
        State::InText(_) => LANG,
        State::InLang(_) | State::Finished => "nothing",
    }
}

fn check_attributes(element: &Element<'_>, allowed: &[&str]) -> std::result::Result<(), String> {
    match element.unexpected_attribute(allowed) {
        Some(attribute) => Err(format!(
            "unexpected attribute '{attribute}' on <{}>",
            element.name
        )),
        None => Ok(()),
    }
}

fn required<'a>(element: &Element<'a>, attribute: &str) -> std::result::Result<&'a str, String> {
    element
        .attribute(attribute)
        .ok_or_else(|| format!("<{}> requires a '{attribute}' attribute", element.name))
}

fn optional_country(element: &Element<'_>) -> std::result::Result<Option<Country>, String> {
    element
        .attribute("country")
        .map(str::parse::<Country>)
        .transpose()
        .map_err(|e| e.to_string())
}
