pub mod aws_translate;
