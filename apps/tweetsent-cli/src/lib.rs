//! Local harness around the classifier: argument handling, startup
//! (config + lexicon), logging, and the JSON-lines record loop.
pub mod args;
pub mod logging;
pub mod pipeline;
pub mod startup;
