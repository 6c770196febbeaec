//! 路由模块

pub mod survey_routes;
