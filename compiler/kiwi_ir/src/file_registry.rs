//! Process-wide table of source files.
//!
//! Tokens carry a small [`FileId`] instead of a path. The registry maps
//! ids back to paths, and to source lines for caret-style error display.
//! It is append-only: ids stay valid for the life of the registry.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Index of a file in the [`FileRegistry`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FileId(i32);

impl FileId {
    /// Standard input, or any source without a file behind it.
    pub const STDIN: FileId = FileId(-1);

    #[inline]
    pub const fn new(raw: i32) -> Self {
        FileId(raw)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_stdin(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_stdin() {
            write!(f, "FileId(stdin)")
        } else {
            write!(f, "FileId({})", self.0)
        }
    }
}

/// Shared handle to a file registry.
pub type SharedFileRegistry = Arc<FileRegistry>;

#[derive(Default)]
struct FileTable {
    paths: Vec<String>,
    ids: FxHashMap<String, FileId>,
    /// Split source lines, filled on registration or on first lookup.
    lines: FxHashMap<FileId, Arc<[String]>>,
}

/// Append-only path ⇄ id table.
///
/// Reads take a shared lock; registration takes the write lock, so one
/// writer at a time.
#[derive(Default)]
pub struct FileRegistry {
    table: RwLock<FileTable>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new registry behind an `Arc`.
    pub fn shared() -> SharedFileRegistry {
        Arc::new(Self::new())
    }

    /// Id of `path`, registering it if needed.
    pub fn register(&self, path: &str) -> FileId {
        if let Some(&id) = self.table.read().ids.get(path) {
            return id;
        }
        let mut table = self.table.write();
        if let Some(&id) = table.ids.get(path) {
            return id;
        }
        let id = FileId(i32::try_from(table.paths.len()).unwrap_or(i32::MAX));
        table.paths.push(path.to_string());
        table.ids.insert(path.to_string(), id);
        id
    }

    /// Register `path` with in-memory contents. Line lookups use
    /// `source` instead of reading the file.
    pub fn register_source(&self, path: &str, source: &str) -> FileId {
        let id = self.register(path);
        self.table.write().lines.insert(id, split_lines(source));
        id
    }

    /// Remember what was read from standard input.
    pub fn set_stdin_source(&self, source: &str) {
        self.table
            .write()
            .lines
            .insert(FileId::STDIN, split_lines(source));
    }

    pub fn id_of(&self, path: &str) -> Option<FileId> {
        self.table.read().ids.get(path).copied()
    }

    /// Path of `id`; `<stdin>` for standard input.
    pub fn path(&self, id: FileId) -> Option<String> {
        if id.is_stdin() {
            return Some("<stdin>".to_string());
        }
        let index = usize::try_from(id.raw()).ok()?;
        self.table.read().paths.get(index).cloned()
    }

    /// Full text of 1-based `line` in file `id`, without its newline.
    ///
    /// Files registered by path only are read from disk on first use.
    pub fn line(&self, id: FileId, line: u32) -> Option<String> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        let lines = self.lines(id)?;
        lines.get(index).cloned()
    }

    fn lines(&self, id: FileId) -> Option<Arc<[String]>> {
        if let Some(lines) = self.table.read().lines.get(&id) {
            return Some(Arc::clone(lines));
        }
        let path = self.path(id).filter(|_| !id.is_stdin())?;
        let source = std::fs::read_to_string(path).ok()?;
        let lines = split_lines(&source);
        self.table.write().lines.insert(id, Arc::clone(&lines));
        Some(lines)
    }

    /// Number of registered files (standard input excluded).
    pub fn len(&self) -> usize {
        self.table.read().paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split on `\r\n`, `\r` or `\n`, the same line breaks the lexer counts.
fn split_lines(source: &str) -> Arc<[String]> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' => lines.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    lines.push(current);
    lines.into()
}

#[cfg(test)]
mod tests;
