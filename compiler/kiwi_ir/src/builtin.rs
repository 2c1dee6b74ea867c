//! Identities of the runtime's builtin name tables.

use std::fmt;

/// A table of builtin names the runtime provides.
///
/// The declaration order is the lookup precedence: when a name appears
/// in several tables, the first table wins. Runtimes that supply tables
/// must respect it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinTable {
    Core,
    Console,
    Env,
    FileIo,
    List,
    Callable,
    Math,
    Task,
    Channel,
    Sys,
    Time,
    Stdin,
    Encoder,
    Serializer,
    Reflector,
    Socket,
    TlsSocket,
    Http,
    Compression,
}

impl BuiltinTable {
    /// Every table, in precedence order.
    pub const ALL: [BuiltinTable; 19] = [
        BuiltinTable::Core,
        BuiltinTable::Console,
        BuiltinTable::Env,
        BuiltinTable::FileIo,
        BuiltinTable::List,
        BuiltinTable::Callable,
        BuiltinTable::Math,
        BuiltinTable::Task,
        BuiltinTable::Channel,
        BuiltinTable::Sys,
        BuiltinTable::Time,
        BuiltinTable::Stdin,
        BuiltinTable::Encoder,
        BuiltinTable::Serializer,
        BuiltinTable::Reflector,
        BuiltinTable::Socket,
        BuiltinTable::TlsSocket,
        BuiltinTable::Http,
        BuiltinTable::Compression,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinTable::Core => "core",
            BuiltinTable::Console => "console",
            BuiltinTable::Env => "env",
            BuiltinTable::FileIo => "fileio",
            BuiltinTable::List => "list",
            BuiltinTable::Callable => "callable",
            BuiltinTable::Math => "math",
            BuiltinTable::Task => "task",
            BuiltinTable::Channel => "channel",
            BuiltinTable::Sys => "sys",
            BuiltinTable::Time => "time",
            BuiltinTable::Stdin => "stdin",
            BuiltinTable::Encoder => "encoder",
            BuiltinTable::Serializer => "serializer",
            BuiltinTable::Reflector => "reflector",
            BuiltinTable::Socket => "socket",
            BuiltinTable::TlsSocket => "tlssocket",
            BuiltinTable::Http => "http",
            BuiltinTable::Compression => "compression",
        }
    }
}

impl fmt::Display for BuiltinTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
