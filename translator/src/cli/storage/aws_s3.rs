use clap::Args;

/// Parameters used to config AWS S3.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct AWSS3CliArgs {
    /// Use the AWS s3 client
    #[arg(long)]
    pub aws_s3: bool,

    /// The ARN / Name of the bucket that receives uploaded documents.
    /// ARN: arn:aws:s3:::name
    #[arg(env = "TRANSLATOR_AWS_S3_INPUT_BUCKET_IDENTIFIER", long, default_value = Some("translator-input"))]
    pub input_bucket_identifier: Option<String>,

    /// The ARN / Name of the bucket that receives translated documents.
    #[arg(env = "TRANSLATOR_AWS_S3_OUTPUT_BUCKET_IDENTIFIER", long, default_value = Some("translator-output"))]
    pub output_bucket_identifier: Option<String>,
}
