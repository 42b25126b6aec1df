use std::io::{self, Write};

use crate::creative::CreatedCreative;

pub fn print_creative<W: Write>(created: &CreatedCreative, mut out: W) -> io::Result<()> {
    let name = created.creative.name.as_deref().unwrap_or("<unnamed>");
    writeln!(out, "Created creative '{name}':")?;

    let json = serde_json::to_string_pretty(&created.body).map_err(io::Error::other)?;
    writeln!(out, "{json}")?;
    out.flush()
}
