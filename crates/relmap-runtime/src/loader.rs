//! Record loader: reads researcher records from delimited or JSON files.
//!
//! The loader only maps rows onto [`ResearcherRecord`]s. Header names are
//! trimmed, missing columns become empty strings and unknown columns are
//! ignored. Rows without an id cannot be addressed by the relevance index and
//! are skipped.

use crate::error::{LoadError, LoadResult};
use relmap_core::types::{Attribute, ResearcherRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Load records from a `.csv`, `.tsv` or `.json` file.
pub fn load_records(path: &Path) -> LoadResult<Vec<ResearcherRecord>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let records = match extension.as_deref() {
        Some("csv") => from_delimited_reader(File::open(path)?, b',')?,
        Some("tsv") => from_delimited_reader(File::open(path)?, b'\t')?,
        Some("json") => from_json_str(&std::fs::read_to_string(path)?)?,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };

    info!(path = %path.display(), records = records.len(), "Loaded researcher records");
    Ok(records)
}

/// Read records from delimited text with a header row.
pub fn from_delimited_reader<R: Read>(reader: R, delimiter: u8) -> LoadResult<Vec<ResearcherRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(rdr.headers()?);
    if columns.id.is_none() {
        warn!("Source has no id column; every row will be skipped");
    }

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = columns.record(&result?);
        if record.id.trim().is_empty() {
            // +2: one for the header row, one for 1-based numbering.
            warn!(row = row + 2, "Skipping row without id");
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

/// Column positions of the record fields within a header row.
struct ColumnMap {
    id: Option<usize>,
    name: Option<usize>,
    affiliation: Option<usize>,
    program: Option<usize>,
    theme: Option<usize>,
    field: Option<usize>,
    keywords: Option<usize>,
    keytechnology: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        Self {
            id: position("id"),
            name: position("name"),
            affiliation: position("affiliation"),
            program: position("program"),
            theme: position("theme"),
            field: position("field"),
            keywords: position("keywords"),
            keytechnology: position("keytechnology"),
        }
    }

    /// Short rows and absent columns yield empty strings.
    fn record(&self, row: &csv::StringRecord) -> ResearcherRecord {
        let get = |column: Option<usize>| {
            column
                .and_then(|idx| row.get(idx))
                .unwrap_or("")
                .to_string()
        };
        ResearcherRecord {
            id: get(self.id),
            name: get(self.name),
            affiliation: get(self.affiliation),
            program: get(self.program),
            theme: get(self.theme),
            field: get(self.field),
            keywords: get(self.keywords),
            keytechnology: get(self.keytechnology),
        }
    }
}

/// Read records from a JSON array.
pub fn from_json_str(json: &str) -> LoadResult<Vec<ResearcherRecord>> {
    let parsed: Vec<ResearcherRecord> = serde_json::from_str(json)?;
    let total = parsed.len();
    let records: Vec<ResearcherRecord> = parsed
        .into_iter()
        .filter(|record| !record.id.trim().is_empty())
        .collect();
    if records.len() < total {
        warn!(skipped = total - records.len(), "Skipping records without id");
    }
    Ok(records)
}

/// Built-in sample of twelve researchers across four research areas.
///
/// Used by demos and tests, and by the web server when no data source is
/// configured.
pub fn sample_records() -> Vec<ResearcherRecord> {
    let rows: &[[&str; 8]] = &[
        // id, name, affiliation, program, theme, field, keywords, keytechnology
        ["1", "Aiko Tanaka", "Kumamoto Univ.", "Moonshot",
         "造血幹細胞の老化と炎症", "造血器腫瘍学・造血幹細胞・造血発生関連,免疫学関連",
         "造血幹細胞, 老化, 炎症", "scRNA-seq, フローサイトメトリー"],
        ["2", "Ken Mori", "Kyoto Univ.", "Moonshot",
         "慢性炎症", "免疫学関連",
         "T細胞、サイトカイン, 炎症", "scRNA-seq"],
        ["3", "Yui Sato", "Osaka Univ.", "CREST",
         "ウイルス感染と宿主応答", "ウイルス学関連",
         "ウイルス, 自然免疫", "Cryo-EM"],
        ["4", "Haruto Suzuki", "Tohoku Univ.", "CREST",
         "がん免疫", "腫瘍生物学関連,免疫学関連",
         "T細胞, がん微小環境", "CRISPR, scRNA-seq"],
        ["5", "Mei Watanabe", "Kumamoto Univ.", "PRESTO",
         "神経炎症", "神経科学一般関連",
         "ミクログリア, 炎症", "イメージング"],
        ["6", "Sora Ito", "Hokkaido Univ.", "Moonshot",
         "慢性炎症", "免疫学関連,病態医化学関連",
         "マクロファージ, 炎症", "イメージング, scRNA-seq"],
        ["7", "Riku Yamamoto", "Nagoya Univ.", "PRESTO",
         "ウイルス感染と宿主応答", "ウイルス学関連,免疫学関連",
         "自然免疫, インターフェロン", "Cryo-EM, CRISPR"],
        ["8", "Hina Nakamura", "Kyushu Univ.", "CREST",
         "老化", "病態医化学関連",
         "老化, 代謝", "メタボロミクス"],
        ["9", "Yuto Kobayashi", "Univ. of Tokyo", "Moonshot",
         "がん免疫", "腫瘍生物学関連",
         "がん微小環境, オルガノイド", "オルガノイド培養"],
        ["10", "Akari Kato", "Keio Univ.", "PRESTO",
         "神経発生", "神経科学一般関連,発生生物学関連",
         "神経幹細胞", "イメージング, CRISPR"],
        ["11", "Takumi Yoshida", "Kobe Univ.", "CREST",
         "", "構造生物化学関連",
         "膜タンパク質", "Cryo-EM"],
        ["12", "Yuna Yamada", "Chiba Univ.", "Moonshot",
         "粘膜免疫", "免疫学関連",
         "B細胞, 腸内細菌", "メタボロミクス, scRNA-seq"],
    ];

    rows.iter()
        .map(|[id, name, affiliation, program, theme, field, keywords, keytechnology]| {
            ResearcherRecord::new(*id)
                .with_name(*name)
                .with_affiliation(*affiliation)
                .with(Attribute::Program, *program)
                .with(Attribute::Theme, *theme)
                .with(Attribute::Field, *field)
                .with(Attribute::Keywords, *keywords)
                .with(Attribute::Keytechnology, *keytechnology)
        })
        .collect()
}
