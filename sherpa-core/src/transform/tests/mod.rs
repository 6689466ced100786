mod transformer_tests;
