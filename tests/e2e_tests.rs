//! End-to-end integration tests
//!
//! These tests drive the complete pipeline: seed accounts from CSV, apply
//! transfer commands through the selected store, and compare the final
//! account CSV against expected output. Each scenario runs against both
//! the synchronous and the asynchronous store.

#[cfg(test)]
mod tests {
    use benefit_ledger::cli::StoreType;
    use benefit_ledger::core::DEFAULT_LOCK_TIMEOUT;
    use benefit_ledger::strategy::create_strategy;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    /// Run the pipeline over inline CSV fixtures and return the output
    fn run_pipeline(accounts_csv: &str, transfers_csv: &str, store: StoreType) -> String {
        let accounts = create_temp_csv(accounts_csv);
        let transfers = create_temp_csv(transfers_csv);

        let strategy = create_strategy(store, DEFAULT_LOCK_TIMEOUT);
        let mut output = Vec::new();
        strategy
            .run(accounts.path(), transfers.path(), &mut output)
            .expect("pipeline failed");

        String::from_utf8(output).unwrap()
    }

    #[rstest]
    fn test_successful_transfer_moves_funds(
        #[values(StoreType::Sync, StoreType::Async)] store: StoreType,
    ) {
        let output = run_pipeline(
            "name,description,balance,active\n\
             meal,meal card,1000.00,true\n\
             transport,bus pass,500.00,true\n",
            "from,to,amount\n1,2,100.00\n",
            store,
        );

        assert_eq!(
            output,
            "id,name,description,balance,active,version\n\
             1,meal,meal card,900.00,true,0\n\
             2,transport,bus pass,600.00,true,0\n"
        );
    }

    #[rstest]
    fn test_insufficient_funds_leaves_balances_unchanged(
        #[values(StoreType::Sync, StoreType::Async)] store: StoreType,
    ) {
        let output = run_pipeline(
            "name,description,balance,active\n\
             a,,50.00,true\n\
             b,,100.00,true\n",
            "from,to,amount\n1,2,100.00\n",
            store,
        );

        assert!(output.contains("1,a,,50.00,true,0"));
        assert!(output.contains("2,b,,100.00,true,0"));
    }

    #[rstest]
    fn test_rejected_commands_do_not_abort_the_run(
        #[values(StoreType::Sync, StoreType::Async)] store: StoreType,
    ) {
        // Self transfer, zero amount, negative amount, missing account,
        // malformed amount: all rejected, the final command still applies
        let output = run_pipeline(
            "name,description,balance,active\n\
             a,,200.00,true\n\
             b,,200.00,true\n",
            "from,to,amount\n\
             1,1,10.00\n\
             1,2,0\n\
             1,2,-5\n\
             9,2,10.00\n\
             1,2,bogus\n\
             1,2,25.00\n",
            store,
        );

        assert!(output.contains("1,a,,175.00,true,0"));
        assert!(output.contains("2,b,,225.00,true,0"));
    }

    #[rstest]
    fn test_conservation_under_opposing_transfers(
        #[values(StoreType::Sync, StoreType::Async)] store: StoreType,
    ) {
        let mut transfers = String::from("from,to,amount\n");
        for i in 0..30 {
            if i % 2 == 0 {
                transfers.push_str("1,2,10.00\n");
            } else {
                transfers.push_str("2,1,10.00\n");
            }
        }

        let output = run_pipeline(
            "name,description,balance,active\n\
             a,,1000.00,true\n\
             b,,1000.00,true\n",
            &transfers,
            store,
        );

        assert!(output.contains("1,a,,1000.00,true,0"));
        assert!(output.contains("2,b,,1000.00,true,0"));
    }

    #[rstest]
    fn test_inactive_accounts_still_transfer(
        #[values(StoreType::Sync, StoreType::Async)] store: StoreType,
    ) {
        // The active flag is administrative metadata; the transfer path
        // does not consult it
        let output = run_pipeline(
            "name,description,balance,active\n\
             a,,100.00,false\n\
             b,,0.00,true\n",
            "from,to,amount\n1,2,40.00\n",
            store,
        );

        assert!(output.contains("1,a,,60.00,false,0"));
        assert!(output.contains("2,b,,40.00,true,0"));
    }

    #[rstest]
    fn test_empty_command_file_reproduces_seeds(
        #[values(StoreType::Sync, StoreType::Async)] store: StoreType,
    ) {
        let output = run_pipeline(
            "name,description,balance,active\n\
             a,,10.00,true\n",
            "from,to,amount\n",
            store,
        );

        assert_eq!(
            output,
            "id,name,description,balance,active,version\n\
             1,a,,10.00,true,0\n"
        );
    }

    #[rstest]
    fn test_missing_accounts_file_is_fatal(
        #[values(StoreType::Sync, StoreType::Async)] store: StoreType,
    ) {
        let transfers = create_temp_csv("from,to,amount\n");

        let strategy = create_strategy(store, DEFAULT_LOCK_TIMEOUT);
        let mut output = Vec::new();
        let result = strategy.run(
            std::path::Path::new("nonexistent.csv"),
            transfers.path(),
            &mut output,
        );

        assert!(result.is_err());
    }
}
