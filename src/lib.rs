// modules tree
pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
}
pub mod dto {
    pub mod requests {
        pub mod signup_request;
    }
}
pub mod errors {
    pub mod code_error;
}
pub mod scenarios {
    pub mod signup;
}
pub mod engine {
    pub mod pause;
    pub mod run_load;
    pub mod task;
}
pub mod init {
    pub mod cli;
    pub mod config;
    pub mod logging;
    pub mod run_init;
}
pub mod util {
    pub mod time {
        pub mod duration_formatter;
        pub mod parse_duration;
    }
}
