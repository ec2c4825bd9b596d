//! Console messages printed around a run.

use std::io::{self, Write};

pub const PROGRESS_NOTICE: &str = "Merci de patienter, le run prend environ 2 minutes";

const RULE_WIDTH: usize = 70;

/// The lines of the closing summary, in order
pub fn summary_lines() -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    vec![
        rule.clone(),
        "✓ Visualisation générée avec succès".to_string(),
        rule.clone(),
        "\n📊 POINTS CLÉS À RETENIR :".to_string(),
        "  • PlateCarree : Simple mais déforme les surfaces aux hautes latitudes".to_string(),
        "  • Robinson : Meilleur compromis pour les analyses globales".to_string(),
        "  • Le choix de la projection impacte l'interprétation des données !".to_string(),
        "\n🌍 Utilisé pour : ERA5-Land, WorldClim, CHIRPS, MSWEP".to_string(),
        rule,
    ]
}

pub fn write_notice<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", PROGRESS_NOTICE)?;
    out.flush()
}

pub fn write_summary<W: Write>(out: &mut W) -> io::Result<()> {
    for line in summary_lines() {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
