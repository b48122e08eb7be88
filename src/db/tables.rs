use redb::TableDefinition;

/// Accounts table: account_id (email) -> AccountRecord (serialized)
///
/// Each value embeds the account's entire `forms` collection. There is no
/// separate table for forms or responses.
pub const ACCOUNTS: TableDefinition<&str, &[u8]> = TableDefinition::new("accounts");

/// Response rate limits table: account_id -> ResponseRateLimit (serialized)
pub const RESPONSE_LIMITS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("response_limits");
