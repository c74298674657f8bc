//! Static self-description served at `GET /` by the guarded variant.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiDescription {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [Endpoint],
}

#[derive(Debug, Serialize)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    pub params: &'static [Field],
    pub body: &'static [Field],
    pub response: &'static str,
    pub errors: &'static [ErrorStatus],
}

#[derive(Debug, Serialize)]
pub struct Field {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorStatus {
    pub status: u16,
    pub when: &'static str,
}

const ID_PARAM: &[Field] = &[Field {
    name: "id",
    kind: "integer",
    required: true,
}];

const SERVER_ERROR: ErrorStatus = ErrorStatus {
    status: 500,
    when: "storage failure; body is {message, error}",
};

const MISSING: ErrorStatus = ErrorStatus {
    status: 404,
    when: "no employee has this id",
};

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        name: "Create employee",
        method: "POST",
        path: "/api/employees",
        params: &[],
        body: &[
            Field {
                name: "name",
                kind: "string",
                required: true,
            },
            Field {
                name: "salary",
                kind: "integer or numeric string",
                required: true,
            },
            Field {
                name: "age",
                kind: "integer or numeric string",
                required: true,
            },
        ],
        response: "201 with the created record {id, name, salary, age}",
        errors: &[
            ErrorStatus {
                status: 400,
                when: "name, salary or age missing, or body is not JSON",
            },
            SERVER_ERROR,
        ],
    },
    Endpoint {
        name: "List employees",
        method: "GET",
        path: "/api/employees",
        params: &[],
        body: &[],
        response: "200 with an array of records",
        errors: &[SERVER_ERROR],
    },
    Endpoint {
        name: "Get employee",
        method: "GET",
        path: "/api/employees/:id",
        params: ID_PARAM,
        body: &[],
        response: "200 with the record {id, name, salary, age}",
        errors: &[MISSING, SERVER_ERROR],
    },
    Endpoint {
        name: "Update employee",
        method: "PATCH",
        path: "/api/employees/:id",
        params: ID_PARAM,
        body: &[
            Field {
                name: "name",
                kind: "string",
                required: false,
            },
            Field {
                name: "salary",
                kind: "integer or numeric string",
                required: false,
            },
            Field {
                name: "age",
                kind: "integer or numeric string",
                required: false,
            },
        ],
        response: "200 with the updated record; omitted fields keep their value",
        errors: &[MISSING, SERVER_ERROR],
    },
    Endpoint {
        name: "Delete employee",
        method: "DELETE",
        path: "/api/employees/:id",
        params: ID_PARAM,
        body: &[],
        response: "200 with {message: \"Employee deleted successfully.\"}",
        errors: &[
            ErrorStatus {
                status: 403,
                when: "id is between 1 and 7 (protected)",
            },
            MISSING,
            SERVER_ERROR,
        ],
    },
];

pub fn description() -> ApiDescription {
    ApiDescription {
        name: "Employee API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
    }
}

pub async fn describe() -> Json<ApiDescription> {
    Json(description())
}
