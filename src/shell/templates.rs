//! Shell snippets appended to startup files
//!
//! Placeholders (`{name}`) are filled by [`crate::template::render`]:
//! `shell`, `alias_file_env`, `alias_file_default`, `alias_prefix_env`,
//! `alias_prefix_default` and `shell_env`.

/// Text whose presence in a startup file means rig is already installed
pub const BEGIN_MARKER_TEXT: &str = " BEGIN RIG BOOTSTRAPPER ";

pub const BEGIN_MARKER: &str = "

#================================#
# === BEGIN RIG BOOTSTRAPPER === #
";

pub const END_MARKER: &str = "
# ==== END RIG BOOTSTRAPPER ==== #
#================================#

";

/// bash and zsh share one snippet; only `{shell}` differs
pub const POSIX_BOOTSTRAPPER: &str = r#"
rg() {
  __rig-clear
  {shell_env}={shell} command rig "$@"
  local rig_status=$?
  if [ -e "${{alias_file_env}}" ]; then
    source "${{alias_file_env}}"
  fi
  return $rig_status
}
__rig-clear() {
  local count_file="${{alias_file_env}}.count"
  local alias_count=""
  if [ -e "$count_file" ]; then
    alias_count="$(cat "$count_file")"
  fi
  case "$alias_count" in
    ''|*[!0-9]*) return 0 ;;
  esac
  if [ "$alias_count" -eq 0 ]; then return 0; fi

  local i
  for i in $(seq "$alias_count"); do
    unalias "${{alias_prefix_env}}${i}" 2>/dev/null
  done

  echo 0 > "$count_file"
}
: "${{alias_prefix_env}:={alias_prefix_default}}"
: "${{alias_file_env}:={alias_file_default}}"
export {alias_prefix_env} {alias_file_env}
"#;

pub const FISH_BOOTSTRAPPER: &str = r#"
function rg
    __rig-clear
    {shell_env}={shell} command rig $argv
    set -l rig_status $status
    if test -e "${alias_file_env}"
        source "${alias_file_env}"
    end
    return $rig_status
end
function __rig-clear
    set -l count_file "${alias_file_env}.count"
    if not test -e "$count_file"
        return 0
    end

    set -l alias_count (cat "$count_file")
    if not string match -qr '^[0-9]+$' -- "$alias_count"
        return 0
    end
    if test "$alias_count" -eq 0
        return 0
    end

    for i in (seq $alias_count)
        functions -e "${alias_prefix_env}$i"
    end

    echo 0 > "$count_file"
end
set -q {alias_prefix_env}; or set -gx {alias_prefix_env} '{alias_prefix_default}'
set -q {alias_file_env}; or set -gx {alias_file_env} '{alias_file_default}'
"#;
