//! Lexicon query contract and the in-memory implementation.

pub mod builder;
pub mod form_idx;

use hashbrown::HashMap;

use crate::errors::Result;
use crate::script;

pub use form_idx::FormIdx;

/// Script class of a lexicon form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FormKind {
    /// The form contains at least one CJK ideograph.
    Kanji,
    /// The form is written entirely in kana.
    Kana,
    /// Any other script mixture.
    Other,
}

/// A single orthographic or reading form of a lexicon entry.
#[derive(Clone, Debug)]
pub struct LexiconForm {
    /// Text of the form as written.
    pub text: String,

    /// Kana reading of the form.
    pub ruby: String,

    /// Script class of the form text.
    pub kind: FormKind,

    /// Per-form frequency priority. Larger is more common.
    pub priority: u8,

    /// Marks a form no longer in contemporary use.
    pub obsolete: bool,

    /// Marks a form kept only for search recall.
    pub search_only: bool,
}

impl LexiconForm {
    /// Creates a plain form with priority 0 and no flags.
    pub fn new<S, R>(text: S, ruby: R, kind: FormKind) -> Self
    where
        S: Into<String>,
        R: Into<String>,
    {
        Self {
            text: text.into(),
            ruby: ruby.into(),
            kind,
            priority: 0,
            obsolete: false,
            search_only: false,
        }
    }
}

/// An entry grouping every form of one word.
///
/// The position of a form in `forms` is its reading index, so the order
/// must never change once the entry is built.
#[derive(Clone, Debug)]
pub struct LexiconEntry {
    /// Identifier of the entry.
    pub word_id: u32,

    /// Entry-level frequency priority. Larger is more common.
    pub priority: u8,

    /// Ordered forms of the entry.
    pub forms: Vec<LexiconForm>,
}

/// Borrowed view of one form together with its entry-level attributes.
#[derive(Clone, Copy, Debug)]
pub struct FormView<'a> {
    idx: FormIdx,
    entry_priority: u8,
    form: &'a LexiconForm,
}

impl<'a> FormView<'a> {
    /// Gets the identifier of the viewed form.
    #[inline(always)]
    pub const fn idx(&self) -> FormIdx {
        self.idx
    }

    /// Gets the priority of the owning entry.
    #[inline(always)]
    pub const fn entry_priority(&self) -> u8 {
        self.entry_priority
    }

    /// Gets the text of the form.
    #[inline(always)]
    pub fn text(&self) -> &'a str {
        &self.form.text
    }

    /// Gets the kana reading of the form.
    #[inline(always)]
    pub fn ruby(&self) -> &'a str {
        &self.form.ruby
    }

    /// Gets the script class of the form.
    #[inline(always)]
    pub const fn kind(&self) -> FormKind {
        self.form.kind
    }

    /// Gets the per-form priority.
    #[inline(always)]
    pub const fn priority(&self) -> u8 {
        self.form.priority
    }

    /// Checks if the form is flagged obsolete.
    #[inline(always)]
    pub const fn is_obsolete(&self) -> bool {
        self.form.obsolete
    }

    /// Checks if the form is flagged search-only.
    #[inline(always)]
    pub const fn is_search_only(&self) -> bool {
        self.form.search_only
    }
}

/// Read-only query contract over a lexicon store.
///
/// Parsing never mutates the store, so implementations are shared behind
/// an [`Arc`](std::sync::Arc). A store that cannot answer should return
/// [`WakachiError::LexiconUnavailable`](crate::errors::WakachiError);
/// an absent key is an empty result, not an error.
pub trait Lexicon: Send + Sync {
    /// Looks up every form whose text equals the given surface.
    fn forms_by_surface(&self, surface: &str) -> Result<Vec<FormIdx>>;

    /// Looks up every form whose folded reading equals the folded reading
    /// of the given kana string.
    fn forms_by_reading(&self, reading: &str) -> Result<Vec<FormIdx>>;

    /// Resolves an index to a view of the form, or `None` if the index
    /// does not name a form of this store.
    fn form(&self, idx: FormIdx) -> Result<Option<FormView<'_>>>;

    /// Checks if any form's text equals the given surface.
    fn contains_surface(&self, surface: &str) -> Result<bool> {
        Ok(!self.forms_by_surface(surface)?.is_empty())
    }
}

/// An in-memory lexicon backed by hash indexes.
///
/// Built once from entries or a CSV stream and queried read-only
/// afterwards.
pub struct MemoryLexicon {
    entries: HashMap<u32, LexiconEntry>,
    surface_index: HashMap<String, Vec<FormIdx>>,
    reading_index: HashMap<String, Vec<FormIdx>>,
}

impl MemoryLexicon {
    /// Builds the indexes over a set of entries.
    ///
    /// # Errors
    ///
    /// [`WakachiError::InvalidArgument`](crate::errors::WakachiError) is
    /// returned if entry ids collide, an entry has no forms, or an entry
    /// has more forms than a reading index can address.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let mut map = HashMap::new();
        let mut surface_index: HashMap<String, Vec<FormIdx>> = HashMap::new();
        let mut reading_index: HashMap<String, Vec<FormIdx>> = HashMap::new();

        for entry in entries {
            if entry.forms.is_empty() {
                return Err(crate::errors::WakachiError::invalid_argument(
                    "entries",
                    format!("entry {} has no forms", entry.word_id),
                ));
            }
            if entry.forms.len() > usize::from(u16::MAX) {
                return Err(crate::errors::WakachiError::invalid_argument(
                    "entries",
                    format!("entry {} has too many forms", entry.word_id),
                ));
            }
            for (i, form) in entry.forms.iter().enumerate() {
                let idx = FormIdx::new(entry.word_id, i as u16);
                surface_index
                    .entry(form.text.clone())
                    .or_default()
                    .push(idx);
                reading_index
                    .entry(script::fold_reading(&form.ruby))
                    .or_default()
                    .push(idx);
            }
            if map.insert(entry.word_id, entry).is_some() {
                return Err(crate::errors::WakachiError::invalid_argument(
                    "entries",
                    "duplicate word id",
                ));
            }
        }

        // Postings keep a fixed order so that equal-scored candidates
        // resolve the same way on every run.
        for postings in surface_index.values_mut() {
            postings.sort_unstable();
        }
        for postings in reading_index.values_mut() {
            postings.sort_unstable();
        }

        Ok(Self {
            entries: map,
            surface_index,
            reading_index,
        })
    }

    /// Gets the number of entries.
    #[inline(always)]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }
}

impl Lexicon for MemoryLexicon {
    fn forms_by_surface(&self, surface: &str) -> Result<Vec<FormIdx>> {
        Ok(self
            .surface_index
            .get(surface)
            .cloned()
            .unwrap_or_default())
    }

    fn forms_by_reading(&self, reading: &str) -> Result<Vec<FormIdx>> {
        Ok(self
            .reading_index
            .get(&script::fold_reading(reading))
            .cloned()
            .unwrap_or_default())
    }

    fn form(&self, idx: FormIdx) -> Result<Option<FormView<'_>>> {
        Ok(self.entries.get(&idx.word_id).and_then(|entry| {
            entry
                .forms
                .get(usize::from(idx.reading_index))
                .map(|form| FormView {
                    idx,
                    entry_priority: entry.priority,
                    form,
                })
        }))
    }

    fn contains_surface(&self, surface: &str) -> Result<bool> {
        Ok(self.surface_index.contains_key(surface))
    }
}
