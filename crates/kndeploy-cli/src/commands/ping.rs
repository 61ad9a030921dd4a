use kndeploy_core::Transcript;

/// Liveness check: confirms the binary runs without calling any tool.
pub fn ping(log: &Transcript) -> anyhow::Result<()> {
    let message = liveness_message();
    log.append(&message);
    println!("{message}");
    Ok(())
}

fn liveness_message() -> String {
    format!("kndeploy is up ({})", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_records_liveness_line() {
        let log = Transcript::new();

        ping(&log).unwrap();

        assert_eq!(log.lines(), vec![liveness_message()]);
        assert!(log.lines()[0].starts_with("kndeploy is up ("));
    }
}
