use crate::errors::Result;
use std::io::Write;

pub fn run() -> Result<()> {
    let (_, registry) = super::load(&Default::default())?;
    let mut stdout = std::io::stdout();
    for (language, extensions) in registry.languages() {
        writeln!(stdout, "{language}: {}", extensions.join(", "))?;
    }
    Ok(())
}
