//! efetch: PubMed XML records to [`RawArticle`]s.
//!
//! Only the handful of elements a search result needs are read; everything
//! else in a `PubmedArticle` is skipped. Inline markup inside titles and
//! abstracts (`<i>`, `<sup>`, ...) is flattened to its text.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use lit_core::entities::RawArticle;

use crate::error::PubMedError;

/// Canonical PubMed landing page for a PMID.
#[must_use]
pub fn article_link(pmid: &str) -> String {
    format!("https://pubmed.ncbi.nlm.nih.gov/{pmid}/")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Pmid,
    Title,
    AbstractSection,
    LastName,
    Initials,
    ForeName,
    CollectiveName,
    Doi,
    ElocationDoi,
    Year,
    MedlineDate,
}

#[derive(Default)]
struct AuthorParts {
    last: String,
    initials: String,
    fore: String,
    collective: String,
}

impl AuthorParts {
    fn render(&self) -> Option<String> {
        if !self.collective.is_empty() {
            return Some(self.collective.clone());
        }
        if self.last.is_empty() {
            return None;
        }
        let given = if self.initials.is_empty() {
            &self.fore
        } else {
            &self.initials
        };
        if given.is_empty() {
            Some(self.last.clone())
        } else {
            Some(format!("{} {given}", self.last))
        }
    }
}

#[derive(Default)]
struct ArticleParts {
    pmid: Option<String>,
    title: String,
    sections: Vec<String>,
    authors: Vec<String>,
    doi: Option<String>,
    elocation_doi: Option<String>,
    year: Option<i32>,
}

impl ArticleParts {
    fn finish(self) -> RawArticle {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        let link = self.pmid.as_deref().map(article_link);
        RawArticle {
            pmid: self.pmid,
            title: non_empty(self.title),
            authors: non_empty(self.authors.join(", ")),
            abstract_text: non_empty(self.sections.join(" ")),
            doi: self.doi.or(self.elocation_doi),
            link,
            year: self.year,
        }
    }
}

/// Text being collected for one element.
struct Capture {
    field: Field,
    depth: usize,
    label: Option<String>,
    text: String,
}

/// Parse an efetch `retmode=xml` body into one record per `PubmedArticle`.
///
/// # Errors
///
/// Returns `PubMedError::Parse` if the document is not well-formed.
pub fn parse_articles(xml: &str) -> Result<Vec<RawArticle>, PubMedError> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<String> = Vec::new();
    let mut articles = Vec::new();
    let mut article: Option<ArticleParts> = None;
    let mut author: Option<AuthorParts> = None;
    let mut capture: Option<Capture> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            PubMedError::Parse(format!(
                "efetch XML at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;
        match event {
            Event::Start(start) => {
                let name = element_name(&start);
                match name.as_str() {
                    "PubmedArticle" => article = Some(ArticleParts::default()),
                    "Author" if parent_is(&path, "AuthorList") => {
                        author = Some(AuthorParts::default());
                    }
                    _ => {}
                }
                path.push(name);
                if capture.is_none() && article.is_some() {
                    if let Some(field) = field_for(&path, &start)? {
                        let label = if field == Field::AbstractSection {
                            attribute(&start, "Label")?
                        } else {
                            None
                        };
                        capture = Some(Capture {
                            field,
                            depth: path.len(),
                            label,
                            text: String::new(),
                        });
                    }
                }
            }
            Event::Text(text) => {
                if let Some(capture) = capture.as_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| PubMedError::Parse(format!("efetch text: {e}")))?;
                    capture.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(capture) = capture.as_mut() {
                    capture
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                if capture.as_ref().is_some_and(|c| c.depth == path.len()) {
                    if let (Some(done), Some(parts)) = (capture.take(), article.as_mut()) {
                        store(parts, author.as_mut(), done);
                    }
                }
                let closed = path.pop();
                match closed.as_deref() {
                    Some("Author") => {
                        if let (Some(done), Some(parts)) = (author.take(), article.as_mut()) {
                            parts.authors.extend(done.render());
                        }
                    }
                    Some("PubmedArticle") => {
                        if let Some(parts) = article.take() {
                            articles.push(parts.finish());
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(articles)
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn parent_is(path: &[String], parent: &str) -> bool {
    path.last().is_some_and(|p| p == parent)
}

/// Ancestor `n` levels above the innermost element of `path` (0 = itself).
fn ancestor(path: &[String], n: usize) -> Option<&str> {
    path.len()
        .checked_sub(n + 1)
        .and_then(|idx| path.get(idx))
        .map(String::as_str)
}

fn attribute(start: &BytesStart<'_>, key: &str) -> Result<Option<String>, PubMedError> {
    let attr = start
        .try_get_attribute(key)
        .map_err(|e| PubMedError::Parse(format!("attribute {key}: {e}")))?;
    attr.map(|a| {
        a.unescape_value()
            .map(|v| v.trim().to_string())
            .map_err(|e| PubMedError::Parse(format!("attribute {key}: {e}")))
    })
    .transpose()
}

/// Which field, if any, the element just opened (last in `path`) feeds.
fn field_for(path: &[String], start: &BytesStart<'_>) -> Result<Option<Field>, PubMedError> {
    let Some(name) = ancestor(path, 0) else {
        return Ok(None);
    };
    let parent = ancestor(path, 1);
    let field = match (name, parent) {
        ("PMID", Some("MedlineCitation")) => Some(Field::Pmid),
        ("ArticleTitle", Some("Article")) => Some(Field::Title),
        ("AbstractText", Some("Abstract")) if ancestor(path, 2) == Some("Article") => {
            Some(Field::AbstractSection)
        }
        ("LastName", Some("Author")) => Some(Field::LastName),
        ("Initials", Some("Author")) => Some(Field::Initials),
        ("ForeName", Some("Author")) => Some(Field::ForeName),
        ("CollectiveName", Some("Author")) => Some(Field::CollectiveName),
        ("Year", Some("PubDate")) => Some(Field::Year),
        ("MedlineDate", Some("PubDate")) => Some(Field::MedlineDate),
        ("ArticleId", Some("ArticleIdList")) if ancestor(path, 2) == Some("PubmedData") => {
            is_doi(start, "IdType")?.then_some(Field::Doi)
        }
        ("ELocationID", Some("Article")) => {
            is_doi(start, "EIdType")?.then_some(Field::ElocationDoi)
        }
        _ => None,
    };
    Ok(field)
}

fn is_doi(start: &BytesStart<'_>, key: &str) -> Result<bool, PubMedError> {
    Ok(attribute(start, key)?.is_some_and(|v| v.eq_ignore_ascii_case("doi")))
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn leading_year(text: &str) -> Option<i32> {
    let digits: String = text.trim().chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

fn store(parts: &mut ArticleParts, author: Option<&mut AuthorParts>, done: Capture) {
    let text = collapse(&done.text);
    match done.field {
        Field::Pmid => {
            if parts.pmid.is_none() && !text.is_empty() {
                parts.pmid = Some(text);
            }
        }
        Field::Title => parts.title = text,
        Field::AbstractSection => {
            if !text.is_empty() {
                match done.label.filter(|l| !l.is_empty()) {
                    Some(label) => parts.sections.push(format!("{label}: {text}")),
                    None => parts.sections.push(text),
                }
            }
        }
        Field::LastName | Field::Initials | Field::ForeName | Field::CollectiveName => {
            if let Some(author) = author {
                let slot = match done.field {
                    Field::LastName => &mut author.last,
                    Field::Initials => &mut author.initials,
                    Field::ForeName => &mut author.fore,
                    _ => &mut author.collective,
                };
                *slot = text;
            }
        }
        Field::Doi => {
            if parts.doi.is_none() && !text.is_empty() {
                parts.doi = Some(text);
            }
        }
        Field::ElocationDoi => {
            if parts.elocation_doi.is_none() && !text.is_empty() {
                parts.elocation_doi = Some(text);
            }
        }
        Field::Year | Field::MedlineDate => {
            if parts.year.is_none() {
                parts.year = leading_year(&text);
            }
        }
    }
}
