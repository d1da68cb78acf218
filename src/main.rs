fn main() -> std::process::ExitCode {
    study_planner::run()
}
