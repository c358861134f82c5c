//! Level files
//!
//! Format: a magic header line `iAIM Level 1.0`, then `x,y,w,h` block
//! records separated by whitespace (normally one per line). Blanks next to a
//! comma belong to the record, so `1, 2, 3, 4` is one block.

use std::path::Path;

use crate::sim::Block;

pub const LEVEL_HEADER: &str = "iAIM Level 1.0";

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing `{LEVEL_HEADER}` header")]
    MissingHeader,

    #[error("bad block record on line {line}: `{text}`")]
    BadRecord { line: usize, text: String },
}

/// Static obstacles of one battlefield
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    pub blocks: Vec<Block>,
}

impl Level {
    pub fn parse(source: &str) -> Result<Self, LevelError> {
        let mut lines = source.lines().enumerate();
        let header = lines.by_ref().find(|(_, l)| !l.trim().is_empty());
        match header {
            Some((_, line)) if line.trim() == LEVEL_HEADER => {}
            _ => return Err(LevelError::MissingHeader),
        }

        let mut blocks = Vec::new();
        for (idx, line) in lines {
            // Blanks are allowed around the commas inside a record
            let line = line.split(',').map(str::trim).collect::<Vec<_>>().join(",");
            for record in line.split_whitespace() {
                let block = parse_record(record).ok_or_else(|| LevelError::BadRecord {
                    line: idx + 1,
                    text: record.to_string(),
                })?;
                blocks.push(block);
            }
        }
        Ok(Self { blocks })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let level = Self::parse(&source)?;
        log::info!("Loaded level {} ({} blocks)", path.display(), level.blocks.len());
        Ok(level)
    }

    /// Serialize back to the file format, one record per line
    pub fn to_source(&self) -> String {
        let mut out = String::from(LEVEL_HEADER);
        out.push('\n');
        for b in &self.blocks {
            out.push_str(&format!("{},{},{},{}\n", b.x, b.y, b.w, b.h));
        }
        out
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LevelError> {
        std::fs::write(path, self.to_source())?;
        Ok(())
    }
}

fn parse_record(record: &str) -> Option<Block> {
    let mut fields = record.split(',').map(|f| f.trim().parse::<i32>());
    let x = fields.next()?.ok()?;
    let y = fields.next()?.ok()?;
    let w = fields.next()?.ok()?;
    let h = fields.next()?.ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Block::new(x, y, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks() {
        let level = Level::parse("iAIM Level 1.0\n100,200,30,40\n500,0,20,300\n").unwrap();
        assert_eq!(
            level.blocks,
            vec![Block::new(100, 200, 30, 40), Block::new(500, 0, 20, 300)]
        );
    }

    #[test]
    fn test_parse_several_records_per_line() {
        let level = Level::parse("iAIM Level 1.0\n1,2,3,4 5,6,7,8\n\n9,10,11,12").unwrap();
        assert_eq!(level.blocks.len(), 3);
        assert_eq!(level.blocks[2], Block::new(9, 10, 11, 12));
    }

    #[test]
    fn test_blanks_after_commas() {
        let level = Level::parse("iAIM Level 1.0\n100, 200, 30, 40\n1 ,2,3,4   5,6 , 7,8\n").unwrap();
        assert_eq!(
            level.blocks,
            vec![
                Block::new(100, 200, 30, 40),
                Block::new(1, 2, 3, 4),
                Block::new(5, 6, 7, 8),
            ]
        );
    }

    #[test]
    fn test_header_only_is_empty_level() {
        let level = Level::parse("iAIM Level 1.0\n").unwrap();
        assert!(level.blocks.is_empty());
    }

    #[test]
    fn test_missing_header_is_fatal() {
        assert!(matches!(
            Level::parse("100,200,30,40\n"),
            Err(LevelError::MissingHeader)
        ));
        assert!(matches!(Level::parse(""), Err(LevelError::MissingHeader)));
    }

    #[test]
    fn test_bad_record_reports_line() {
        match Level::parse("iAIM Level 1.0\n1,2,3,4\n1,2,x,4\n") {
            Err(LevelError::BadRecord { line, text }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "1,2,x,4");
            }
            other => panic!("expected BadRecord, got {other:?}"),
        }
        assert!(Level::parse("iAIM Level 1.0\n1,2,3\n").is_err());
        assert!(Level::parse("iAIM Level 1.0\n1,2,3,4,5\n").is_err());
    }

    #[test]
    fn test_save_and_reload_keeps_every_block() {
        let level = Level {
            blocks: vec![
                Block::new(10, 20, 30, 40),
                Block::new(-5, 0, 100, 8),
                Block::new(400, 300, 64, 64),
            ],
        };
        let path = std::env::temp_dir().join(format!("iaim-level-{}.txt", std::process::id()));
        level.save(&path).unwrap();
        let loaded = Level::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let mut expected = level.blocks.clone();
        let mut got = loaded.blocks;
        expected.sort_by_key(|b| (b.x, b.y, b.w, b.h));
        got.sort_by_key(|b| (b.x, b.y, b.w, b.h));
        assert_eq!(got, expected);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Level::load("/nonexistent/iaim/level.txt"),
            Err(LevelError::Io(_))
        ));
    }
}
