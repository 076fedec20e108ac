//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Every path in [`super::path`] is relative to this address
    pub const CLIENT_DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";
}

pub mod storage {
    /// Key the access token is persisted under
    pub const STORAGE_KEY_ACCESS: &str = "token";
    /// Key the refresh token is persisted under
    pub const STORAGE_KEY_REFRESH: &str = "refresh";
}

pub mod error {
    pub const ERR_LOGIN_FAILED: &str = "Login failed";
    pub const ERR_REGISTRATION_FAILED: &str = "Registration failed";
    pub const ERR_PROFILE_UPDATE_FAILED: &str = "Failed to update";
    pub const ERR_CHANGE_PASSWORD_FAILED: &str = "Failed to change password";
    /// Field whose messages are shown without a `field: ` prefix
    pub const NON_FIELD_ERRORS_KEY: &str = "non_field_errors";
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;

    // Session
    pub const PATH_AUTH_TOKEN: PathSpec = PathSpec::post("auth/token/");
    pub const PATH_REGISTER: PathSpec = PathSpec::post("register/");
    pub const PATH_USERS_ME: PathSpec = PathSpec::get("users/me/");

    // Profile
    pub const PATH_PROFILE_UPDATE: PathSpec = PathSpec::patch("users/me/");
    pub const PATH_PROFILE_AVATAR_REMOVE: PathSpec = PathSpec::delete("users/me/avatar/");
    pub const PATH_CHANGE_PASSWORD: PathSpec = PathSpec::post("users/change-password/");

    // Dashboard
    pub const PATH_DASHBOARD_STATS: PathSpec = PathSpec::get("dashboard/stats/");
    pub const PATH_ROOMS_STATS: PathSpec = PathSpec::get("rooms/stats/");
    pub const PATH_PAYMENTS_STATS: PathSpec = PathSpec::get("payments/stats/");

    // Rooms
    pub const PATH_ROOMS_AVAILABLE: PathSpec = PathSpec::get("rooms/available/");
    pub const PATH_ALLOCATIONS_ACTIVE: PathSpec = PathSpec::get("allocations/active/");
    pub const PATH_ALLOCATION_CREATE: PathSpec = PathSpec::post("allocations/");
    pub const PATH_ALLOCATION_TRANSFER: PathSpec = PathSpec::post("allocations/transfer/");

    // Students and payments
    pub const PATH_STUDENTS: PathSpec = PathSpec::get("users/students/");
    pub const PATH_PAYMENTS: PathSpec = PathSpec::get("payments/");
    pub const PATH_PAYMENTS_PENDING: PathSpec = PathSpec::get("payments/pending/");

    // Attendance
    pub const PATH_ATTENDANCE: PathSpec = PathSpec::get("attendance/");
    pub const PATH_ATTENDANCE_MARK: PathSpec = PathSpec::post("attendance/mark/");

    // Complaints
    pub const PATH_COMPLAINTS: PathSpec = PathSpec::get("complaints/");
    pub const PATH_COMPLAINT_CREATE: PathSpec = PathSpec::post("complaints/");
    pub const PATH_COMPLAINT_COMMENT: PathSpec = PathSpec::post("complaints/{id}/comments/");

    // Maintenance
    pub const PATH_MAINTENANCE: PathSpec = PathSpec::get("maintenance/");
    pub const PATH_MAINTENANCE_CREATE: PathSpec = PathSpec::post("maintenance/");
    pub const PATH_MAINTENANCE_UPDATE_STATUS: PathSpec =
        PathSpec::patch("maintenance/{id}/update_status/");

    // Notices
    pub const PATH_NOTICES: PathSpec = PathSpec::get("notices/");
    pub const PATH_NOTICE_READ: PathSpec = PathSpec::post("notices/{id}/read/");
    pub const PATH_NOTICE_UNREAD: PathSpec = PathSpec::post("notices/{id}/unread/");

    // Visitors
    pub const PATH_VISITORS: PathSpec = PathSpec::get("visitors/");
    pub const PATH_VISITOR_CREATE: PathSpec = PathSpec::post("visitors/");
    pub const PATH_VISITOR_UPDATE: PathSpec = PathSpec::patch("visitors/{id}/");
}
