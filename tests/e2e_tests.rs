//! End-to-end integration tests
//!
//! These tests validate the complete evaluation pipeline using predefined
//! fixtures. Each fixture test:
//! 1. Reads input.jsonl from a fixture directory
//! 2. Evaluates every snapshot through the engine
//! 3. Generates the CSV decision report
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Pay-later lifecycle (order, shipment, cancel, refund)
//! - Pay-now lifecycle (order, refund, cancel of an open charge)
//! - Invalid transaction logs
//! - Payment method validation
//!
//! Each test is run twice: once with the synchronous strategy and once with the async one.

#[cfg(test)]
mod tests {
    use payment_action_engine::cli::StrategyType;
    use payment_action_engine::core::{MethodCatalog, ProviderMethodCatalog};
    use payment_action_engine::strategy::{create_strategy, BatchConfig};
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    fn standard_catalog() -> Arc<dyn MethodCatalog> {
        Arc::new(ProviderMethodCatalog::standard().clone())
    }

    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(
        input: &Path,
        strategy_type: StrategyType,
        catalog: Arc<dyn MethodCatalog>,
    ) -> String {
        // Small batches so the async strategy crosses batch boundaries
        let config = Some(BatchConfig::new(3, 2));
        let strategy = create_strategy(strategy_type, config, catalog);

        let mut output = Vec::new();
        strategy
            .process(input, &mut output)
            .unwrap_or_else(|e| panic!("Failed to process snapshots: {}", e));
        String::from_utf8(output).expect("Report is not UTF-8")
    }

    /// Run a fixture by processing input.jsonl and comparing with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if the fixture files cannot be read or the report differs.
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.jsonl", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        let actual_output = run(Path::new(&input_path), strategy_type, standard_catalog());

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("pay_later_lifecycle")]
    #[case("pay_now_lifecycle")]
    #[case("invalid_logs")]
    #[case("method_validation")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy);
    }

    #[rstest]
    fn test_malformed_lines_are_reported_in_place(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let input = create_temp_file(concat!(
            r#"{"id":"a","paymentMethodInfo":{"method":"creditcard"},"amountPlanned":{"centAmount":500,"currencyCode":"EUR"},"transactions":[{"type":"Charge","state":"Initial","amount":{"centAmount":500,"currencyCode":"EUR"}}]}"#,
            "\n",
            "{\"id\":\"b\",\"amountPlanned\":\n",
            "\n",
            r#"{"id":"c","amountPlanned":{"centAmount":500,"currencyCode":"EUR"},"transactions":[{"type":"Capture","state":"Initial","amount":{"centAmount":500,"currencyCode":"EUR"}}]}"#,
            "\n",
            r#"{"id":"d","paymentMethodInfo":{"method":"creditcard"},"amountPlanned":{"centAmount":500,"currencyCode":"EUR"},"transactions":[{"type":"Refund","state":"Initial","amount":{"centAmount":500,"currencyCode":"EUR"}}]}"#,
            "\n",
        ));

        let output = run(input.path(), strategy, standard_catalog());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5, "unexpected report:\n{}", output);
        assert_eq!(lines[1], "1,a,createOrder,");
        assert!(lines[2].starts_with("2,,,Payment parse error at line 2: "));
        // serde lists the expected variants with commas, so the field is quoted
        assert!(lines[3].starts_with("4,,,\"Payment parse error at line 4: unknown variant"));
        assert_eq!(lines[4], "5,d,noAction,cannot refund with no Charge");
    }

    #[rstest]
    fn test_custom_catalog_changes_routing(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        // "invoice" is pay-later here and "creditcard" does not exist
        let catalog = create_temp_file(
            r#"{"methods":[
                {"name":"invoice","supportsIssuer":false,"payLater":true},
                {"name":"voucher","supportsIssuer":true,"payLater":false}
            ]}"#,
        );
        let catalog: Arc<dyn MethodCatalog> =
            Arc::new(ProviderMethodCatalog::load(catalog.path()).expect("Failed to load catalog"));

        let input = create_temp_file(concat!(
            r#"{"id":"a","paymentMethodInfo":{"method":"invoice"},"amountPlanned":{"centAmount":500,"currencyCode":"EUR"},"transactions":[{"type":"Authorization","state":"Initial","amount":{"centAmount":500,"currencyCode":"EUR"}}]}"#,
            "\n",
            r#"{"id":"b","paymentMethodInfo":{"method":"voucher,acme"},"amountPlanned":{"centAmount":500,"currencyCode":"EUR"},"transactions":[{"type":"Charge","state":"Initial","amount":{"centAmount":500,"currencyCode":"EUR"}}]}"#,
            "\n",
            r#"{"id":"c","paymentMethodInfo":{"method":"creditcard"},"amountPlanned":{"centAmount":500,"currencyCode":"EUR"},"transactions":[{"type":"Charge","state":"Initial","amount":{"centAmount":500,"currencyCode":"EUR"}}]}"#,
            "\n",
        ));

        assert_eq!(
            run(input.path(), strategy, catalog),
            "line,payment,action,error\n\
             1,a,createOrder,\n\
             2,b,createOrder,\n\
             3,c,noAction,payment method 'creditcard' is not supported\n"
        );
    }

    #[rstest]
    fn test_empty_input_writes_header_only(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let input = create_temp_file("\n\n");
        assert_eq!(
            run(input.path(), strategy, standard_catalog()),
            "line,payment,action,error\n"
        );
    }

    #[rstest]
    fn test_invalid_utf8_line_is_reported_in_place(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let mut input = create_temp_file(concat!(
            r#"{"id":"a","paymentMethodInfo":{"method":"creditcard"},"amountPlanned":{"centAmount":500,"currencyCode":"EUR"},"transactions":[{"type":"Charge","state":"Initial","amount":{"centAmount":500,"currencyCode":"EUR"}}]}"#,
            "\n",
        ));
        input
            .write_all(b"\xff\xfe\n")
            .expect("Failed to write to temp file");
        input
            .write_all(br#"{"id":"c","amountPlanned":{"centAmount":500,"currencyCode":"EUR"}}"#)
            .expect("Failed to write to temp file");
        input.flush().expect("Failed to flush temp file");

        let output = run(input.path(), strategy, standard_catalog());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4, "unexpected report:\n{}", output);
        assert_eq!(lines[1], "1,a,createOrder,");
        assert!(lines[2].starts_with("2,,,Payment parse error at line 2: "));
        assert_eq!(lines[3], "3,c,noAction,");
    }

    #[rstest]
    fn test_unreadable_input_is_fatal(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        // A directory opens fine on Linux but every read fails
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let strategy = create_strategy(strategy, None, standard_catalog());
        let mut output = Vec::new();

        let error = strategy.process(dir.path(), &mut output).unwrap_err();
        assert!(error.contains("Failed to read line 1"), "{}", error);
    }

    #[rstest]
    fn test_missing_input_is_fatal(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let strategy = create_strategy(strategy, None, standard_catalog());
        let mut output = Vec::new();

        let error = strategy
            .process(Path::new("tests/fixtures/does_not_exist.jsonl"), &mut output)
            .unwrap_err();
        assert!(error.contains("Failed to open file"));
    }
}
