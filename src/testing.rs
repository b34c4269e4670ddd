//! In-memory stand-ins for the network and external commands.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use crate::http::{Fetch, FetchError};
use crate::process::{CommandOutput, CommandRunner};

enum Canned {
    Body(Vec<u8>),
    Status(u16),
}

/// Serves canned bodies per URL and records every request made.
pub struct FakeFetch {
    responses: HashMap<String, Canned>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeFetch {
    pub fn new() -> FakeFetch {
        FakeFetch { responses: HashMap::new(), calls: RefCell::new(Vec::new()) }
    }

    pub fn with(mut self, url: &str, body: &[u8]) -> FakeFetch {
        self.responses.insert(url.to_string(), Canned::Body(body.to_vec()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> FakeFetch {
        self.responses.insert(url.to_string(), Canned::Status(status));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Fetch for FakeFetch {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        match self.responses.get(url) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(code)) => Err(FetchError::Status(*code)),
            None => Err(FetchError::Status(404)),
        }
    }
}

/// Answers commands by program name and records the argument lists.
pub struct FakeRunner {
    outputs: HashMap<String, CommandOutput>,
    failing_args: Vec<String>,
    pub calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl FakeRunner {
    pub fn new() -> FakeRunner {
        FakeRunner { outputs: HashMap::new(), failing_args: Vec::new(), calls: RefCell::new(Vec::new()) }
    }

    pub fn with_stdout(mut self, program: &str, stdout: &str) -> FakeRunner {
        self.outputs.insert(
            program.to_string(),
            CommandOutput { success: true, stdout: stdout.to_string(), stderr: String::new() },
        );
        self
    }

    pub fn with_exit_failure(mut self, program: &str, stderr: &str) -> FakeRunner {
        self.outputs.insert(
            program.to_string(),
            CommandOutput { success: false, stdout: String::new(), stderr: stderr.to_string() },
        );
        self
    }

    /// Any invocation carrying this argument exits non-zero.
    pub fn failing_when_arg(mut self, arg: &str) -> FakeRunner {
        self.failing_args.push(arg.to_string());
        self
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push((program.to_string(), args.iter().map(|a| a.to_string()).collect()));
        if args.iter().any(|a| self.failing_args.iter().any(|f| f == a)) {
            return Ok(CommandOutput { success: false, stdout: String::new(), stderr: "property not found".to_string() });
        }
        match self.outputs.get(program) {
            Some(out) => Ok(out.clone()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, format!("{}: command not found", program))),
        }
    }
}
