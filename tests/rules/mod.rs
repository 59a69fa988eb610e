mod wc003_test;
mod wc046_test;
mod wc063_test;
