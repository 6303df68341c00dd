pub mod url_normalizer;
