pub mod vmms;
