mod query_normalization_tests;
