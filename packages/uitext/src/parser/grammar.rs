//! The resource document grammar and its DTD.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Root element name.
pub const CONTENT: &str = "content";
/// Element holding the texts of one group.
pub const GROUP: &str = "group";
/// Element holding the variants of one text id.
pub const TEXT: &str = "text";
/// Element holding one language variant.
pub const LANG: &str = "lang";

/// DTD text of the resource grammar.
///
/// Documents that declare `<!DOCTYPE content SYSTEM "...">` get this text
/// as their internal subset instead of having the external DTD fetched.
pub const CONTENT_DTD: &str = r#"<!ELEMENT content (group)+>
<!ELEMENT group (text)+>
<!ATTLIST group name CDATA #REQUIRED>
<!ELEMENT text (lang)+>
<!ATTLIST text id CDATA #REQUIRED country (at|de|ch|uk|us|ru) #IMPLIED>
<!ELEMENT lang (#PCDATA)>
<!ATTLIST lang id (de|en|fr|it|es|pl|nl|ru|sys) #REQUIRED country (at|de|ch|uk|us|ru) #IMPLIED>"#;

/// Matches a `content` doctype that points at an external DTD, when it is
/// preceded only by prolog content (whitespace, processing instructions
/// and comments).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EXTERNAL_DOCTYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?s)\A(?P<prolog>(?:\s|<\?.*?\?>|<!--.*?-->)*)"#,
        r#"(?P<doctype><!DOCTYPE\s+content\s+(?:SYSTEM\s+(?:"[^"]*"|'[^']*')|PUBLIC\s+(?:"[^"]*"|'[^']*')\s+(?:"[^"]*"|'[^']*'))\s*>)"#,
    ))
    .expect("valid regex")
});

/// Replace an external `content` doctype with the inline grammar DTD.
///
/// Only a doctype in the prolog is rewritten; the same text inside the
/// document body is left alone. The replacement keeps the line count of the
/// original declaration so error positions still point at the author's
/// lines.
///
/// # Examples
/// ```
/// use uitext::parser::grammar::inline_doctype;
///
/// let xml = r#"<!DOCTYPE content SYSTEM "content.dtd"><content/>"#;
/// assert!(inline_doctype(xml).starts_with("<!DOCTYPE content ["));
///
/// let plain = "<content/>";
/// assert_eq!(inline_doctype(plain), plain);
/// ```
pub fn inline_doctype(xml: &str) -> Cow<'_, str> {
    EXTERNAL_DOCTYPE.replace(xml, |captures: &Captures<'_>| {
        let newlines = captures["doctype"].matches('\n').count();
        let dtd = CONTENT_DTD.lines().collect::<Vec<_>>().join(" ");
        format!(
            "{}<!DOCTYPE content [{dtd}]>{}",
            &captures["prolog"],
            "\n".repeat(newlines)
        )
    })
}
