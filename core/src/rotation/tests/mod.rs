mod rotation_tests;
