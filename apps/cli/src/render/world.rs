//! In-memory Typst `World` for single-document compilation.
//!
//! The resume is a single virtual source file; no assets, no filesystem.
//! Fonts come from the embedded `typst-assets` set and are loaded once per
//! process.

use std::sync::OnceLock;

use chrono::{Datelike, Local, Timelike};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

static FONT_CACHE: OnceLock<FontCache> = OnceLock::new();

fn global_font_cache() -> &'static FontCache {
    FONT_CACHE.get_or_init(FontCache::new)
}

/// Embedded fonts shared by all compilations in this process.
#[derive(Debug)]
struct FontCache {
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
}

impl FontCache {
    fn new() -> Self {
        let mut book = FontBook::new();
        let mut fonts = Vec::new();

        for data in typst_assets::fonts() {
            let buffer = Bytes::from_static(data);
            for font in Font::iter(buffer) {
                book.push(font.info().clone());
                fonts.push(font);
            }
        }

        tracing::debug!("font cache initialized with {} fonts", fonts.len());
        Self {
            book: LazyHash::new(book),
            fonts,
        }
    }
}

/// A world holding exactly one source file, the generated resume markup.
pub struct DocumentWorld {
    main: Source,
    font_cache: &'static FontCache,
    library: LazyHash<Library>,
}

impl DocumentWorld {
    pub fn new(markup: String) -> Self {
        let id = FileId::new(None, VirtualPath::new("/main.typ"));
        Self {
            main: Source::new(id, markup),
            font_cache: global_font_cache(),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for DocumentWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.font_cache.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.font_cache.fonts.get(index).cloned()
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let now = Local::now() + chrono::Duration::hours(offset.unwrap_or(0));
        Datetime::from_ymd_hms(
            now.year(),
            now.month() as u8,
            now.day() as u8,
            now.hour() as u8,
            now.minute() as u8,
            now.second() as u8,
        )
    }
}
