use clap::Args;

/// Parameters used to config Amazon Translate.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct AWSTranslateCliArgs {
    /// Use Amazon Translate as the translation provider
    #[arg(long)]
    pub aws_translate: bool,
}
