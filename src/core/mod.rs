// Core - 경로 위젯 로직과 키 바인딩
pub mod actions;
pub mod completion;
pub mod key_filter;
pub mod normalizer;
pub mod validator;
