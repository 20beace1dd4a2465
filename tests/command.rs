/*!
Defines a simple command snapshotting mechanism.

This took some inspiration from `insta-cmd`, but re-works a few things. In
particular, the wrapper around `std::process::Command` defined here is an
owned builder instead of a mutable one, which makes the little helper
functions in the test suites compose nicely at the expense of allocs
(which we do not care about in tests). Commands can also be fed stdin
directly from a byte string, which is how the line-delimited input modes
get exercised.

I specifically wrote this in a way that it has no other dependencies on
other modules in this crate. That means it should be very easy to copy &
paste to other test suites.
*/

use std::{
    collections::BTreeMap,
    env::consts::EXE_SUFFIX,
    ffi::{OsStr, OsString},
    io::Write,
    path::Path,
    process, thread,
};

macro_rules! run_and_snapshot {
    ($cmd:expr, $body:expr) => {{
        let snap = $cmd.snapshot();
        let mut settings = insta::Settings::clone_current();
        settings.set_info(snap.info());
        settings.set_omit_expression(true);
        settings.bind(|| ($body)(snap.snapshot()));
    }};
}

macro_rules! assert_cmd_snapshot {
    ($spawnable:expr, @$snapshot:literal $(,)?) => {{
        $crate::command::run_and_snapshot!($spawnable, |snapshot: &str| {
            insta::assert_snapshot!(snapshot, @$snapshot);
        });
    }};
    ($name:expr, $spawnable:expr $(,)?) => {{
        $crate::command::run_and_snapshot!($spawnable, |snapshot: &str| {
            insta::assert_snapshot!($name, snapshot);
        });
    }};
    ($spawnable:expr $(,)?) => {{
        $crate::command::run_and_snapshot!($spawnable, |snapshot: &str| {
            insta::assert_snapshot!(snapshot);
        });
    }};
}

pub(crate) use {assert_cmd_snapshot, run_and_snapshot};

/// A snapshot generated from running a command.
///
/// This also comes with some contextual info that is shown in the `cargo
/// insta review` user interface, but is not actually included in the
/// snapshot.
pub struct Snapshot {
    /// The contextual info put into the `cargo insta review` user
    /// interface.
    info: CommandInfo,
    /// The actual snapshot contents.
    snapshot: String,
    /// The raw `stdout` of the command.
    stdout: String,
}

impl Snapshot {
    /// Creates a new snapshot from a wrapped command and the process
    /// output.
    fn new(cmd: &Command, output: &process::Output) -> Snapshot {
        let mut info = cmd.info();
        if let Some(ref stdin) = cmd.stdin {
            info.set_stdin(stdin);
        }
        let snapshot = format!(
            "success: {:?}\n\
             exit_code: {}\n\
             ----- stdout -----\n\
             {}\n\
             ----- stderr -----\n\
             {}",
            output.status.success(),
            output.status.code().unwrap_or(!0),
            bytes_to_string(&output.stdout),
            bytes_to_string(&output.stderr),
        );
        let stdout = bytes_to_string(&output.stdout);
        Snapshot { info, snapshot, stdout }
    }

    /// Returns the Insta "info" that contextualizes the snapshot.
    pub fn info(&self) -> &CommandInfo {
        &self.info
    }

    /// Returns the snapshot derived from running the command.
    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    /// Returns the stdout of the command that was run.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }
}

/// A wrapper around `std::process::Command`.
///
/// This basically exposes the same builder API, except it returns
/// `Command` instead of `&mut Command` and knows how to feed a fixed
/// byte string to the child's stdin. We don't wrap the various output
/// types like `Child` and `Output`; the `snapshot` method is the only
/// way the tests run anything.
#[derive(Clone, Debug)]
pub struct Command {
    bin: OsString,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    stdin: Option<Vec<u8>>,
}

impl Command {
    /// Create a new command wrapper for the given binary program.
    pub fn new(bin: impl AsRef<OsStr>) -> Command {
        Command {
            bin: bin.as_ref().to_os_string(),
            args: vec![],
            envs: vec![],
            stdin: None,
        }
    }

    /// Add an argument to the end of this command invocation.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Command {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add arguments to the end of this command invocation.
    pub fn args(
        mut self,
        args: impl IntoIterator<Item = impl AsRef<OsStr>>,
    ) -> Command {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Set an environment variable.
    pub fn env(
        mut self,
        key: impl AsRef<OsStr>,
        val: impl AsRef<OsStr>,
    ) -> Command {
        self.envs.push((
            key.as_ref().to_os_string(),
            val.as_ref().to_os_string(),
        ));
        self
    }

    /// Pass the provided bytes as stdin to this command when it runs.
    ///
    /// When no stdin is set, the command runs with stdin attached to
    /// the null device.
    pub fn stdin(mut self, bytes: impl Into<Vec<u8>>) -> Command {
        self.stdin = Some(bytes.into());
        self
    }

    /// Turn this wrapper into a fresh `std::process::Command`.
    fn std(&self) -> process::Command {
        let mut cmd = process::Command::new(&self.bin);
        cmd.args(self.args.iter());
        for (key, val) in self.envs.iter() {
            cmd.env(key, val);
        }
        cmd
    }

    /// Runs this command and returns a snapshot based on its output.
    pub fn snapshot(&self) -> Snapshot {
        let mut cmd = self.std();
        cmd.stdout(process::Stdio::piped());
        cmd.stderr(process::Stdio::piped());
        let output = match self.stdin {
            None => {
                cmd.stdin(process::Stdio::null());
                cmd.output().unwrap()
            }
            Some(ref stdin) => {
                // Feed stdin from another thread so that a child that
                // writes a lot before reading can't deadlock us.
                cmd.stdin(process::Stdio::piped());
                let mut child = cmd.spawn().unwrap();
                let mut child_stdin = child.stdin.take().unwrap();
                let stdin = stdin.clone();
                let writer = thread::spawn(move || {
                    child_stdin.write_all(&stdin)
                });
                let output = child.wait_with_output().unwrap();
                writer.join().unwrap().unwrap();
                output
            }
        };
        Snapshot::new(self, &output)
    }

    /// Returns the info for this command.
    pub fn info(&self) -> CommandInfo {
        CommandInfo::new(&self.std())
    }
}

/// Information about a particular command.
///
/// This is fed into `insta` as contextual information that doesn't appear
/// directly in the snapshot, but instead in the `cargo insta review` user
/// interface.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CommandInfo {
    bin: String,
    args: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stdin: Option<String>,
}

impl CommandInfo {
    fn new(cmd: &process::Command) -> CommandInfo {
        let bin = Path::new(cmd.get_program())
            .file_name()
            .map(|name| os_str_to_string(name))
            .unwrap_or_else(|| "{UNKNOWN}".to_string());
        let bin = bin
            .strip_suffix(EXE_SUFFIX)
            .map(|stripped| stripped.to_string())
            .unwrap_or(bin);
        CommandInfo {
            bin,
            args: cmd.get_args().map(os_str_to_string).collect(),
            env: cmd
                .get_envs()
                .map(|(k, v)| {
                    (
                        os_str_to_string(k),
                        os_str_to_string(v.unwrap_or(OsStr::new(""))),
                    )
                })
                .collect(),
            stdin: None,
        }
    }

    fn set_stdin(&mut self, bytes: &[u8]) {
        self.stdin = Some(bytes_to_string(bytes));
    }
}

/// Return a command prepared to execute the binary with the given name.
pub fn bin(name: &str) -> Command {
    Command::new(bin_path(name))
}

/// Returns a path to the Cargo project binary with the given name.
fn bin_path(name: &str) -> std::path::PathBuf {
    std::env::current_exe()
        .unwrap()
        .parent()
        .expect("executable's directory")
        .parent()
        .expect("target profile directory")
        .join(format!("{name}{}", EXE_SUFFIX))
}

/// Turns a slice of bytes into a human readable string.
fn bytes_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Like `bytes_to_string`, but starts with an OS string.
fn os_str_to_string(os_str: &OsStr) -> String {
    os_str.to_string_lossy().into_owned()
}
