// ABC 2.1 information fields <https://abcnotation.com/wiki/abc:standard:v2.1#information_fields>

/// Known header codes with their human readable names, in registry order.
pub const INFORMATION_FIELDS: [(char, &str); 14] = [
    ('X', "Reference number"),
    ('T', "Tune title"),
    ('C', "Composer"),
    ('O', "Origin"),
    ('A', "Author of lyrics"),
    ('M', "Meter"),
    ('L', "Unit note length"),
    ('Q', "Tempo"),
    ('P', "Parts"),
    ('Z', "Transcriber"),
    ('N', "Notes"),
    ('G', "Group"),
    ('H', "History"),
    ('K', "Key"),
];

/// Human readable name of a header code, `None` for codes outside the registry.
pub fn field_name(code: char) -> Option<&'static str> {
    INFORMATION_FIELDS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

/// Whether `code` is one of the registered header codes.
pub fn is_known_field(code: char) -> bool {
    field_name(code).is_some()
}
