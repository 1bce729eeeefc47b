use log::info;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::runtime::Runtime;

use super::Emitter;

/// Render an Ansible playbook installing every root package.
pub fn render_playbook(roots: &[String]) -> String {
    let mut out = String::from(
        "---\n\
         - name: Install explicitly installed packages\n  \
           hosts: localhost\n  \
           become: true\n",
    );

    if roots.is_empty() {
        out.push_str("  tasks: []\n");
        return out;
    }

    out.push_str("  tasks:\n");
    for name in roots {
        // JSON strings are valid YAML double-quoted scalars.
        let task = quote(&format!("install {name}"));
        let package = quote(name);
        out.push_str(&format!(
            "    - name: {task}\n      \
               community.general.pacman:\n        \
                 name: {package}\n        \
                 state: present\n"
        ));
    }
    out
}

fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Writes the playbook to a file, replacing it atomically on every cycle.
pub struct PlaybookWriter<'a, R: Runtime> {
    runtime: &'a R,
    output: PathBuf,
}

impl<'a, R: Runtime> PlaybookWriter<'a, R> {
    pub fn new(runtime: &'a R, output: PathBuf) -> Self {
        Self { runtime, output }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.output.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl<R: Runtime> Emitter for PlaybookWriter<'_, R> {
    #[tracing::instrument(skip(self, roots))]
    fn emit(&mut self, roots: &[String]) -> Result<()> {
        let tmp_path = self.tmp_path();
        let content = render_playbook(roots);

        self.runtime
            .write(&tmp_path, content.as_bytes())
            .map_err(|e| Error::io(&tmp_path, e))?;
        self.runtime
            .rename(&tmp_path, &self.output)
            .map_err(|e| Error::io(&self.output, e))?;

        info!(
            "Wrote {} package(s) to {}",
            roots.len(),
            self.output.display()
        );
        Ok(())
    }
}
