use std::fmt;

/// A program and its arguments, executed without a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Commands run in order, stopping at the first failure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandChain {
    pub steps: Vec<CommandLine>,
}

impl CommandChain {
    pub fn new(steps: Vec<CommandLine>) -> Self {
        Self { steps }
    }
}

impl fmt::Display for CommandChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_command_line() {
        let cmd = CommandLine::new("lli").arg("a.ll");
        assert_eq!(cmd.to_string(), "lli a.ll");

        let chain = CommandChain::new(vec![cmd.clone(), CommandLine::new("true")]);
        assert_eq!(chain.to_string(), "lli a.ll && true");
    }
}
