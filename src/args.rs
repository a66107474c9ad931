use std::error::Error;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a single tag from -t/--tag flag
    pub fn extract_tag(&mut self) -> Result<String, Box<dyn Error>> {
        match self.iter.next() {
            Some(v) => {
                let tag = crate::tags::normalize_tag(&v);
                if tag.is_empty() {
                    Err(format!("Invalid tag provided to {}", self.command_name).into())
                } else {
                    Ok(tag)
                }
            }
            None => {
                Err(format!("Provide a tag after -t/--tag for {}", self.command_name).into())
            }
        }
    }

    /// Extract a string value for a flag
    pub fn extract_value(&mut self, flag: &str) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name).into()
        })
    }

    /// Get next argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    /// Collect remaining args
    pub fn collect_remaining(self) -> Vec<String> {
        self.iter.collect()
    }
}

/// Flags shared by every command. Each command reads the ones it needs.
#[derive(Default, Debug, PartialEq)]
pub struct CommonFlags {
    pub title: Option<String>,
    pub src: Option<String>,
    pub file: Option<String>,
    pub path: Option<String>,
    pub tags: Vec<String>,
    pub search: Option<String>,
    pub positional: Vec<String>,
}

impl CommonFlags {
    pub fn parse(args: Vec<String>, command_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut flags = Self::default();
        let mut parser = ArgParser::new(args, command_name);
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "-t" | "--tag" => flags.tags.push(parser.extract_tag()?),
                "--title" => flags.title = Some(parser.extract_value("--title")?),
                "--src" => flags.src = Some(parser.extract_value("--src")?),
                "--file" => flags.file = Some(parser.extract_value("--file")?),
                "--path" => flags.path = Some(parser.extract_value("--path")?),
                "-s" | "--search" => flags.search = Some(parser.extract_value("--search")?),
                "--" => {
                    flags.positional.extend(parser.collect_remaining());
                    break;
                }
                _ => flags.positional.push(arg),
            }
        }
        Ok(flags)
    }
}
