mod canonical_request_tests;
