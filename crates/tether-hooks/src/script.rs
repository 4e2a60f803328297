//! The trampoline script written into `.git/hooks/<name>`.
//!
//! The script changes into the package directory and hands off to
//! `tether run <hook>` through the package manager's local-binary runner.
//! Its first line is the ownership marker; git runs marker-first files
//! through `/bin/sh` when `execve` reports `ENOEXEC`.

/// Values interpolated into a hook template.
#[derive(Clone, Copy, Debug)]
pub struct RenderParams<'a> {
    /// Placed inside `cd "<work_dir>"`, escaped with [`escape_double_quoted`].
    pub work_dir: &'a str,
    /// Opaque token selecting the runner syntax (`npm`, `pnpm`, `yarn`, ...).
    pub package_manager: &'a str,
    pub version: &'a str,
}

/// Escape `value` for use between double quotes in a POSIX shell.
///
/// Only `\`, `"`, `$` and `` ` `` keep a special meaning there, so every other
/// byte of a directory name passes through unchanged.
#[must_use]
pub fn escape_double_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Version stamped into rendered scripts.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const TRAMPOLINE: &str = r#"# tether
# Managed hook (tether {{version}}). Delete the first line to take ownership of this file.

hookName="{{hook_name}}"
packageManager="{{package_manager}}"

debug() {
  if [ "$TETHER_DEBUG" = "1" ] || [ "$TETHER_DEBUG" = "true" ]; then
    echo "tether:debug $*" >&2
  fi
}

if [ "$TETHER_SKIP_HOOKS" = "1" ] || [ "$TETHER_SKIP_HOOKS" = "true" ]; then
  debug "TETHER_SKIP_HOOKS is set, skipping $hookName"
  exit 0
fi

cd "{{work_dir}}" || exit 1
debug "running $hookName in $(pwd) via $packageManager"

case "$packageManager" in
  npm) runner="npx --no-install" ;;
  pnpm) runner="pnpm exec" ;;
  yarn) runner="yarn run --silent" ;;
  *) runner="" ;;
esac

if [ -n "$runner" ]; then
  if ! command -v "${runner%% *}" >/dev/null 2>&1; then
    echo "tether: $packageManager not found, skipping $hookName hook" >&2
    exit 0
  fi
elif ! command -v tether >/dev/null 2>&1; then
  echo "tether: runner not found, skipping $hookName hook" >&2
  exit 0
fi

exec $runner tether run "$hookName" "$@"
"#;
