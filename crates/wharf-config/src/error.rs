use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Read { path: String, source: std::io::Error },

    #[error("failed to render `{{{{NAME}}}}` placeholders in config file `{path}`: {source}")]
    Template { path: String, source: wharf_descriptor::template::TemplateError },

    #[error("failed to parse config file `{path}`: {source}")]
    Parse { path: String, source: wharf_descriptor::DescriptorError },
}
