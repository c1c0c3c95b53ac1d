//! JSON output for CLI commands

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write `value` as pretty JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write `value` to stdout
pub fn write_stdout<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_json(&mut lock, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_ends_with_newline() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!([])).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }
}
