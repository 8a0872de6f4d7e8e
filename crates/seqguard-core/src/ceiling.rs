//! Maximum representable values for supported primary key types.

/// A supported integer storage type and its largest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCeiling {
    pub sql_type: &'static str,
    pub max_value: u64,
}

/// Every type the analyzer knows how to project. Lookup is exact on the
/// lowercased, trimmed type name.
pub const TYPE_CEILINGS: &[TypeCeiling] = &[
    TypeCeiling {
        sql_type: "smallint",
        max_value: i16::MAX as u64,
    },
    TypeCeiling {
        sql_type: "integer",
        max_value: i32::MAX as u64,
    },
    TypeCeiling {
        sql_type: "bigint",
        max_value: i64::MAX as u64,
    },
];

/// Look up the ceiling for a declared SQL type.
///
/// Returns `None` for types outside [`TYPE_CEILINGS`].
pub fn ceiling_for(sql_type: &str) -> Option<u64> {
    let normalized = sql_type.trim().to_ascii_lowercase();
    TYPE_CEILINGS
        .iter()
        .find(|c| c.sql_type == normalized)
        .map(|c| c.max_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ceilings() {
        assert_eq!(ceiling_for("smallint"), Some(32_767));
        assert_eq!(ceiling_for("integer"), Some(2_147_483_647));
        assert_eq!(ceiling_for("bigint"), Some(9_223_372_036_854_775_807));
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        assert_eq!(ceiling_for(" BIGINT "), ceiling_for("bigint"));
    }

    #[test]
    fn unknown_type_has_no_ceiling() {
        assert_eq!(ceiling_for("character varying"), None);
        assert_eq!(ceiling_for("uuid"), None);
        assert_eq!(ceiling_for(""), None);
    }
}
