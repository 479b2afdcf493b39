pub fn main() -> anyhow::Result<()> {
    lambda_pid_counter::exec_tokio()
}
