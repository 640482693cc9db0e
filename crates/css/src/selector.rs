//! Selector model, parsing with specificity, and matching.
//!
//! Matching is generic over [`MatchElement`] so this crate stays agnostic of
//! the tree it runs against; the style engine adapts its document type to the
//! trait. `match_selector` is the full selector-matcher contract: match result
//! plus the selector's priority weight.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PseudoClass {
    Root,
    FirstChild,
    LastChild,
    Host,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SimpleSelector {
    Type(String),
    Id(String),
    Class(String),
    Universal,
    Attribute {
        name: String,
        value: Option<String>,
    },
    PseudoClass(PseudoClass),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct ComplexSelector {
    /// Left-to-right sequence of (compound, combinator-to-next). The last
    /// combinator is None.
    pub sequence: Vec<(CompoundSelector, Option<Combinator>)>,
    pub specificity: Specificity,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Default)]
pub struct Specificity(pub u32);

impl Specificity {
    pub fn from_counts(a: u32, b: u32, c: u32) -> Self {
        // a in high bits, then b, then c
        Specificity((a << 20) | (b << 10) | c)
    }
}

impl ComplexSelector {
    /// True for selectors whose text begins with `:host`. The cascade routes
    /// these to the shadow host instead of ordinary matching.
    pub fn targets_host(&self) -> bool {
        self.sequence.first().is_some_and(|(compound, _)| {
            compound.simples.first() == Some(&SimpleSelector::PseudoClass(PseudoClass::Host))
        })
    }
}

/// Element view the matcher runs against: identity checks plus the tree moves
/// the supported combinators and pseudo-classes need. Sibling accessors skip
/// non-element nodes.
pub trait MatchElement: Sized + Clone {
    fn tag_matches(&self, tag: &str) -> bool;
    fn id_matches(&self, id: &str) -> bool;
    fn has_class(&self, class: &str) -> bool;
    fn attribute_matches(&self, name: &str, expected: Option<&str>) -> bool;
    fn parent_element(&self) -> Option<Self>;
    fn previous_sibling_element(&self) -> Option<Self>;
    fn next_sibling_element(&self) -> Option<Self>;
    fn is_root(&self) -> bool;
}

/// Match `selector` against `element`, returning the selector's specificity
/// (the cascade priority weight) on success.
pub fn match_selector<E: MatchElement>(element: &E, selector: &ComplexSelector) -> Option<Specificity> {
    let sequence = &selector.sequence;
    let (rightmost, _) = sequence.last()?;
    if !match_compound(element, rightmost) {
        return None;
    }
    let mut current = element.clone();
    let mut index = sequence.len() - 1;
    while index > 0 {
        let (compound, combinator) = &sequence[index - 1];
        match combinator.unwrap_or(Combinator::Descendant) {
            Combinator::Descendant => {
                // Climb ancestors to the nearest match.
                let mut ancestor = current.parent_element();
                let mut found = None;
                while let Some(candidate) = ancestor {
                    if match_compound(&candidate, compound) {
                        found = Some(candidate);
                        break;
                    }
                    ancestor = candidate.parent_element();
                }
                current = found?;
            }
            Combinator::Child => {
                let parent = current.parent_element()?;
                if !match_compound(&parent, compound) {
                    return None;
                }
                current = parent;
            }
            Combinator::NextSibling => {
                let previous = current.previous_sibling_element()?;
                if !match_compound(&previous, compound) {
                    return None;
                }
                current = previous;
            }
            Combinator::SubsequentSibling => {
                let mut sibling = current.previous_sibling_element();
                let mut found = None;
                while let Some(candidate) = sibling {
                    if match_compound(&candidate, compound) {
                        found = Some(candidate);
                        break;
                    }
                    sibling = candidate.previous_sibling_element();
                }
                current = found?;
            }
        }
        index -= 1;
    }
    Some(selector.specificity)
}

fn match_compound<E: MatchElement>(element: &E, compound: &CompoundSelector) -> bool {
    compound.simples.iter().all(|simple| match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => element.tag_matches(tag),
        SimpleSelector::Id(id) => element.id_matches(id),
        SimpleSelector::Class(class) => element.has_class(class),
        SimpleSelector::Attribute { name, value } => {
            element.attribute_matches(name, value.as_deref())
        }
        SimpleSelector::PseudoClass(pseudo) => match pseudo {
            PseudoClass::Root => element.is_root(),
            PseudoClass::FirstChild => element.previous_sibling_element().is_none(),
            PseudoClass::LastChild => element.next_sibling_element().is_none(),
            // Host targeting is the cascade's job, never matched here.
            PseudoClass::Host => false,
        },
    })
}

/// Parse a comma-separated selector list. Selectors using unsupported
/// features (pseudo-elements, unknown pseudo-classes, attribute operators
/// other than `=`) are dropped from the list.
pub fn parse_selector_list(text: &str) -> Vec<ComplexSelector> {
    split_selector_list(text)
        .into_iter()
        .filter_map(|part| parse_complex(part.trim()))
        .collect()
}

/// Comma split that respects brackets and quotes (attribute values).
fn split_selector_list(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None if c == ',' && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }
    parts.push(&text[start..]);
    parts
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let before = self.rest.len();
        self.rest = self.rest.trim_start();
        before != self.rest.len()
    }

    fn take_ident(&mut self) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
            .map_or(self.rest.len(), |(i, _)| i);
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        ident
    }
}

/// Specificity counts accumulated during parsing: (ids, classes+attributes+
/// pseudo-classes, types).
type Counts = (u32, u32, u32);

fn parse_complex(text: &str) -> Option<ComplexSelector> {
    if text.is_empty() {
        return None;
    }
    let mut cursor = Cursor { rest: text };
    let mut sequence = Vec::new();
    let mut counts: Counts = (0, 0, 0);
    loop {
        cursor.skip_whitespace();
        let compound = parse_compound(&mut cursor, &mut counts)?;
        if compound.simples.is_empty() {
            return None;
        }
        let had_space = cursor.skip_whitespace();
        let combinator = match cursor.peek() {
            None => {
                sequence.push((compound, None));
                break;
            }
            Some('>') => {
                cursor.bump();
                Combinator::Child
            }
            Some('+') => {
                cursor.bump();
                Combinator::NextSibling
            }
            Some('~') => {
                cursor.bump();
                Combinator::SubsequentSibling
            }
            Some(_) if had_space => Combinator::Descendant,
            Some(_) => return None,
        };
        sequence.push((compound, Some(combinator)));
    }
    Some(ComplexSelector {
        sequence,
        specificity: Specificity::from_counts(counts.0, counts.1, counts.2),
    })
}

fn parse_compound(cursor: &mut Cursor<'_>, counts: &mut Counts) -> Option<CompoundSelector> {
    let mut simples = Vec::new();
    loop {
        match cursor.peek() {
            Some('*') => {
                cursor.bump();
                simples.push(SimpleSelector::Universal);
            }
            Some('#') => {
                cursor.bump();
                let ident = cursor.take_ident();
                if ident.is_empty() {
                    return None;
                }
                counts.0 += 1;
                simples.push(SimpleSelector::Id(ident.to_string()));
            }
            Some('.') => {
                cursor.bump();
                let ident = cursor.take_ident();
                if ident.is_empty() {
                    return None;
                }
                counts.1 += 1;
                simples.push(SimpleSelector::Class(ident.to_string()));
            }
            Some('[') => {
                cursor.bump();
                simples.push(parse_attribute(cursor, counts)?);
            }
            Some(':') => {
                cursor.bump();
                if cursor.peek() == Some(':') {
                    // Pseudo-elements are unsupported.
                    return None;
                }
                let name = cursor.take_ident().to_ascii_lowercase();
                let pseudo = match name.as_str() {
                    "root" => PseudoClass::Root,
                    "first-child" => PseudoClass::FirstChild,
                    "last-child" => PseudoClass::LastChild,
                    "host" => PseudoClass::Host,
                    _ => return None,
                };
                counts.1 += 1;
                simples.push(SimpleSelector::PseudoClass(pseudo));
            }
            Some(c) if c.is_ascii_alphanumeric() || c == '-' || c == '_' => {
                let ident = cursor.take_ident();
                counts.2 += 1;
                simples.push(SimpleSelector::Type(ident.to_ascii_lowercase()));
            }
            _ => break,
        }
    }
    Some(CompoundSelector { simples })
}

fn parse_attribute(cursor: &mut Cursor<'_>, counts: &mut Counts) -> Option<SimpleSelector> {
    let end = cursor.rest.find(']')?;
    let inner = &cursor.rest[..end];
    cursor.rest = &cursor.rest[end + 1..];
    let (name, value) = match inner.find('=') {
        None => (inner.trim(), None),
        Some(eq) => {
            let name = inner[..eq].trim();
            // Operators other than plain `=` are unsupported.
            if name.ends_with(['~', '|', '^', '$', '*']) {
                return None;
            }
            let raw = inner[eq + 1..].trim();
            let unquoted = raw
                .strip_prefix(['"', '\''])
                .and_then(|s| s.strip_suffix(['"', '\'']))
                .unwrap_or(raw);
            (name, Some(unquoted))
        }
    };
    if name.is_empty() {
        return None;
    }
    counts.1 += 1;
    Some(SimpleSelector::Attribute {
        name: name.to_ascii_lowercase(),
        value: value.map(str::to_string),
    })
}
