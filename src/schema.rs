/// Column-name constants for the refugee-flows schema.
/// Single source of truth - exported to Python via PyO3.

// ── Record columns ──────────────────────────────────────────────────────────
pub mod record {
    pub const ORIGIN: &str = "Country or territory of origin";
    pub const RESIDENCE: &str = "Country or territory of asylum or residence";
    pub const YEAR: &str = "Year";
}

// ── Category columns ────────────────────────────────────────────────────────
pub mod category {
    pub const REFUGEES: &str = "Refugees*";
    pub const REFUGEES_ASSISTED: &str = "Refugees assisted by UNHCR";
    pub const REFUGEE_LIKE: &str = "Total refugees and people in refugee-like situations**";
    pub const REFUGEE_LIKE_ASSISTED: &str =
        "Total refugees and people in refugee-like situations assisted by UNHCR";

    pub const ALL: [&str; 4] = [
        REFUGEES,
        REFUGEES_ASSISTED,
        REFUGEE_LIKE,
        REFUGEE_LIKE_ASSISTED,
    ];
}

// ── Filter scopes ───────────────────────────────────────────────────────────
pub mod scope {
    pub const PIE: &str = "pie";
    pub const MAP: &str = "map";
    pub const SANKEY: &str = "sankey";
}

// ── Input file format ───────────────────────────────────────────────────────
pub mod csv {
    pub const SEPARATOR: u8 = b';';
}
