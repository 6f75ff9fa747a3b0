//! Integration test harness.

mod integration {
    mod assembly_test;
    mod catalog_test;
    mod cli_test;
    mod linker_test;
    mod session_test;
}
