//! Decoded legacy query requests and command extraction.
//!
//! The upstream decoder hands over the full collection name and the parsed
//! query document. Commands travel on the `<db>.$cmd` pseudo-collection and
//! name themselves with the document's leading key.

use docshim_document::Document;

/// Suffix marking the command pseudo-collection.
pub const COMMAND_NAMESPACE_SUFFIX: &str = ".$cmd";

/// A decoded `OP_QUERY` message.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyQuery {
    full_collection_name: String,
    query: Document,
}

impl LegacyQuery {
    /// Creates a request for `full_collection_name` carrying `query`.
    pub fn new(full_collection_name: impl Into<String>, query: Document) -> Self {
        Self {
            full_collection_name: full_collection_name.into(),
            query,
        }
    }

    /// Namespace in `<database>.<collection>` form.
    #[must_use]
    pub fn full_collection_name(&self) -> &str {
        &self.full_collection_name
    }

    /// Query (or command) document.
    #[must_use]
    pub fn query(&self) -> &Document {
        &self.query
    }

    /// Database part of the namespace.
    #[must_use]
    pub fn database(&self) -> &str {
        self.full_collection_name
            .split_once('.')
            .map_or(self.full_collection_name.as_str(), |(database, _)| database)
    }

    /// Command name: the key of the first field, or `""` for an empty document.
    #[must_use]
    pub fn command_name(&self) -> &str {
        self.query.first_key().unwrap_or_default()
    }

    /// Returns `true` when the request targets the `$cmd` pseudo-collection.
    #[must_use]
    pub fn is_command_namespace(&self) -> bool {
        self.full_collection_name.ends_with(COMMAND_NAMESPACE_SUFFIX)
    }

    /// Classified command name.
    #[must_use]
    pub fn command(&self) -> CommandKind {
        CommandKind::parse(self.command_name())
    }
}

/// Commands the legacy dispatcher knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Topology discovery, spelled `isMaster` or `ismaster`.
    IsMaster,
    /// First step of SASL authentication.
    SaslStart,
    /// Anything else.
    Other,
}

impl CommandKind {
    /// Classifies a command name.
    ///
    /// Matching is exact apart from the two historical spellings of the
    /// discovery command.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "isMaster" | "ismaster" => Self::IsMaster,
            "saslStart" => Self::SaslStart,
            _ => Self::Other,
        }
    }

    /// Canonical command name, or `None` for unrecognised commands.
    #[must_use]
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Self::IsMaster => Some("isMaster"),
            Self::SaslStart => Some("saslStart"),
            Self::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn command(name: &str) -> Document {
        Document::new().with(name, 1_i32).with("comment", "handshake")
    }

    #[rstest]
    #[case("isMaster", CommandKind::IsMaster)]
    #[case("ismaster", CommandKind::IsMaster)]
    #[case("ISMASTER", CommandKind::Other)]
    #[case("hello", CommandKind::Other)]
    #[case("saslStart", CommandKind::SaslStart)]
    #[case("saslstart", CommandKind::Other)]
    #[case("", CommandKind::Other)]
    fn classifies_command_names(#[case] name: &str, #[case] expected: CommandKind) {
        assert_eq!(CommandKind::parse(name), expected);
    }

    #[test]
    fn command_name_is_the_leading_key() {
        let query = LegacyQuery::new("admin.$cmd", command("ismaster"));
        assert_eq!(query.command_name(), "ismaster");
        assert_eq!(query.command(), CommandKind::IsMaster);
        assert_eq!(query.command().as_str(), Some("isMaster"));
    }

    #[test]
    fn empty_document_has_empty_command_name() {
        let query = LegacyQuery::new("admin.$cmd", Document::new());
        assert_eq!(query.command_name(), "");
        assert_eq!(query.command(), CommandKind::Other);
    }

    #[rstest]
    #[case("admin.$cmd", true)]
    #[case("test.$cmd", true)]
    #[case("test.users", false)]
    #[case("test.$cmd.sys", false)]
    #[case("$cmd", false)]
    fn classifies_command_namespace(#[case] namespace: &str, #[case] expected: bool) {
        let query = LegacyQuery::new(namespace, command("ping"));
        assert_eq!(query.is_command_namespace(), expected);
    }

    #[rstest]
    #[case("admin.$cmd", "admin")]
    #[case("app.users.archive", "app")]
    #[case("bare", "bare")]
    fn extracts_database(#[case] namespace: &str, #[case] expected: &str) {
        let query = LegacyQuery::new(namespace, command("ping"));
        assert_eq!(query.database(), expected);
    }
}
