//! Building of [`MemoryLexicon`] from CSV streams.

use std::io::{BufRead, BufReader, Read};

use hashbrown::HashMap;

use crate::errors::{Result, WakachiError};
use crate::lexicon::{FormKind, LexiconEntry, LexiconForm, MemoryLexicon};
use crate::utils;

impl MemoryLexicon {
    /// Builds a lexicon from a CSV stream.
    ///
    /// Each record describes one form as
    /// `word_id,entry_priority,text,ruby,kind,form_priority,flags`,
    /// where `kind` is one of `kanji`, `kana`, or `other`, and `flags` is
    /// a semicolon-joined subset of `obsolete` and `search`. Records of
    /// one entry share a `word_id`, and the reading index of a form is
    /// its record order within the entry.
    ///
    /// # Errors
    ///
    /// [`WakachiError`] is returned if a record is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use wakachi::lexicon::MemoryLexicon;
    ///
    /// let lexicon_csv = "1578010,3,兎,うさぎ,kanji,0,
    /// 1578010,3,うさぎ,うさぎ,kana,0,
    /// 1578010,3,ウサギ,うさぎ,kana,0,search";
    ///
    /// let lexicon = MemoryLexicon::from_reader(lexicon_csv.as_bytes())?;
    /// assert_eq!(lexicon.num_entries(), 1);
    /// assert!(lexicon.contains_surface("兎")?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut order = vec![];
        let mut entries: HashMap<u32, LexiconEntry> = HashMap::new();

        for (i, line) in BufReader::new(rdr).lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let fields = utils::parse_csv_row(&line);
            if fields.len() != 7 {
                return Err(WakachiError::invalid_format(
                    "lexicon",
                    format!(
                        "record {}: expected 7 fields, got {}",
                        i + 1,
                        fields.len()
                    ),
                ));
            }

            let word_id: u32 = fields[0].parse()?;
            let entry_priority: u8 = fields[1].parse()?;
            let kind = match fields[4].as_str() {
                "kanji" => FormKind::Kanji,
                "kana" => FormKind::Kana,
                "other" => FormKind::Other,
                k => {
                    return Err(WakachiError::invalid_format(
                        "lexicon",
                        format!("record {}: unknown form kind: {k}", i + 1),
                    ));
                }
            };
            let form_priority: u8 = fields[5].parse()?;

            let mut obsolete = false;
            let mut search_only = false;
            for flag in fields[6].split(';').filter(|f| !f.is_empty()) {
                match flag {
                    "obsolete" => obsolete = true,
                    "search" => search_only = true,
                    f => {
                        return Err(WakachiError::invalid_format(
                            "lexicon",
                            format!("record {}: unknown flag: {f}", i + 1),
                        ));
                    }
                }
            }

            let form = LexiconForm {
                text: fields[2].clone(),
                ruby: fields[3].clone(),
                kind,
                priority: form_priority,
                obsolete,
                search_only,
            };

            match entries.get_mut(&word_id) {
                Some(entry) => {
                    if entry.priority != entry_priority {
                        return Err(WakachiError::invalid_format(
                            "lexicon",
                            format!(
                                "record {}: conflicting priority for entry {word_id}",
                                i + 1
                            ),
                        ));
                    }
                    entry.forms.push(form);
                }
                None => {
                    order.push(word_id);
                    entries.insert(
                        word_id,
                        LexiconEntry {
                            word_id,
                            priority: entry_priority,
                            forms: vec![form],
                        },
                    );
                }
            }
        }

        let entries: Vec<_> = order
            .into_iter()
            .filter_map(|word_id| entries.remove(&word_id))
            .collect();
        Self::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexicon::{FormIdx, Lexicon, MemoryLexicon};

    #[test]
    fn test_from_reader() {
        let csv = "1129240,4,ママ,まま,kana,0,
1516930,2,継母,ままはは,kanji,0,
1516930,2,ママ,まま,kana,0,search";
        let lex = MemoryLexicon::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(lex.num_entries(), 2);
        assert_eq!(
            lex.forms_by_surface("ママ").unwrap(),
            vec![FormIdx::new(1129240, 0), FormIdx::new(1516930, 1)]
        );
        let view = lex.form(FormIdx::new(1516930, 1)).unwrap().unwrap();
        assert!(view.is_search_only());
    }

    #[test]
    fn test_reading_index_order() {
        let csv = "1576870,3,俺,おれ,kanji,0,
1576870,3,己,おれ,kanji,0,obsolete
1576870,3,おれ,おれ,kana,0,
1576870,3,オレ,おれ,kana,0,";
        let lex = MemoryLexicon::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            lex.forms_by_surface("オレ").unwrap(),
            vec![FormIdx::new(1576870, 3)]
        );
        let view = lex.form(FormIdx::new(1576870, 1)).unwrap().unwrap();
        assert!(view.is_obsolete());
    }

    #[test]
    fn test_field_count_rejected() {
        let csv = "1129240,4,ママ,まま,kana,0";
        assert!(MemoryLexicon::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let csv = "1129240,4,ママ,まま,romaji,0,";
        assert!(MemoryLexicon::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let csv = "1129240,4,ママ,まま,kana,0,rare";
        assert!(MemoryLexicon::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_conflicting_priority_rejected() {
        let csv = "1129240,4,ママ,まま,kana,0,
1129240,2,まま,まま,kana,0,";
        assert!(MemoryLexicon::from_reader(csv.as_bytes()).is_err());
    }
}
