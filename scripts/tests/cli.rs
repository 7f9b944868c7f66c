use assert_cmd::Command;
use predicates::str::contains;

/// The first default account of a local Anvil / Hardhat node
const DEV_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("crypt-scripts").unwrap();
    cmd.env_remove("PKEY").env_remove("RPC_URL");
    cmd
}

#[test]
fn help_lists_steps() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("deploy-vault"))
        .stdout(contains("deploy-strategy"))
        .stdout(contains("initialize"))
        .stdout(contains("deploy-all"));
}

#[test]
fn malformed_private_key_exits_one() {
    cmd()
        .args(["--priv-key", "not-a-key", "deploy-vault"])
        .assert()
        .code(1)
        .stderr(contains("ClientInitialization"));
}

#[test]
fn unreachable_node_exits_one() {
    cmd()
        .args(["--priv-key", DEV_PKEY, "--rpc-url", "http://127.0.0.1:1", "initialize"])
        .assert()
        .code(1)
        .stderr(contains("ClientInitialization"));
}

#[test]
fn nothing_printed_to_stdout_on_failure() {
    cmd()
        .args(["--priv-key", DEV_PKEY, "--rpc-url", "http://127.0.0.1:1", "deploy-all"])
        .assert()
        .failure()
        .stdout(predicates::str::is_empty());
}
