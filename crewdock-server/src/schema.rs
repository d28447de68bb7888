//! Diesel schema definitions for CrewDock server.

diesel::table! {
    users (id) {
        id -> Text,
        username -> Text,
        password_hash -> Text,
        full_name -> Text,
        email -> Nullable<Text>,
        role -> Text,
        is_active -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    sessions (id) {
        id -> Text,
        user_id -> Text,
        token -> Text,
        created_at -> Timestamp,
        last_used_at -> Timestamp,
    }
}

diesel::table! {
    owners (id) {
        id -> Text,
        name -> Text,
        code -> Nullable<Text>,
        country -> Nullable<Text>,
        contact -> Nullable<Text>,
        email -> Nullable<Text>,
        notes -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    vessels (id) {
        id -> Text,
        name -> Text,
        vessel_type -> Nullable<Text>,
        flag -> Nullable<Text>,
        owner_id -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    crew (id) {
        id -> Text,
        crew_code -> Text,
        full_name -> Text,
        rank -> Text,
        crew_status -> Text,
        vessel_name -> Nullable<Text>,
        date_of_birth -> Nullable<Date>,
        place_of_birth -> Nullable<Text>,
        address -> Nullable<Text>,
        phone -> Nullable<Text>,
        reported_to_office -> Bool,
        reported_to_office_date -> Nullable<Timestamp>,
        last_offboard_date -> Nullable<Timestamp>,
        inactive_reason -> Nullable<Text>,
        offboard_notes -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    assignments (id) {
        id -> Text,
        crew_id -> Text,
        vessel_id -> Nullable<Text>,
        vessel_name -> Text,
        rank -> Text,
        status -> Text,
        sign_on -> Nullable<Timestamp>,
        sign_off -> Nullable<Timestamp>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    certificates (id) {
        id -> Text,
        crew_id -> Text,
        cert_type -> Text,
        cert_number -> Nullable<Text>,
        issue_date -> Nullable<Timestamp>,
        expiry_date -> Nullable<Timestamp>,
        issuer -> Nullable<Text>,
        remarks -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    employment_applications (id) {
        id -> Text,
        crew_id -> Text,
        applied_rank -> Nullable<Text>,
        status -> Text,
        application_date -> Timestamp,
        interview_date -> Nullable<Timestamp>,
        interview_notes -> Nullable<Text>,
        offered_date -> Nullable<Timestamp>,
        accepted_date -> Nullable<Timestamp>,
        rejection_reason -> Nullable<Text>,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    checklists (id) {
        id -> Text,
        crew_id -> Text,
        application_id -> Nullable<Text>,
        item_name -> Text,
        is_provided -> Bool,
        remarks -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    managed_documents (id) {
        id -> Text,
        document_code -> Text,
        document_title -> Text,
        document_type -> Text,
        category -> Text,
        current_revision -> Integer,
        status -> Text,
        prepared_by -> Text,
        reviewed_by -> Nullable<Text>,
        approved_by -> Nullable<Text>,
        effective_date -> Nullable<Timestamp>,
        revision_date -> Nullable<Timestamp>,
        file_path -> Text,
        file_type -> Nullable<Text>,
        description -> Nullable<Text>,
        retention_period -> Integer,
        remarks -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    document_revisions (id) {
        id -> Text,
        document_id -> Text,
        revision_number -> Integer,
        change_summary -> Text,
        reason_for_change -> Nullable<Text>,
        file_path -> Text,
        prepared_by -> Text,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    document_approvals (id) {
        id -> Text,
        document_id -> Text,
        revision_number -> Integer,
        approver_role -> Text,
        approver_name -> Text,
        action -> Text,
        comments -> Nullable<Text>,
        approved_at -> Timestamp,
    }
}

diesel::table! {
    document_distributions (id) {
        id -> Text,
        document_id -> Text,
        distributed_to -> Text,
        distribution_method -> Text,
        distributed_by -> Text,
        distributed_at -> Timestamp,
        acknowledged_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    form_templates (id) {
        id -> Text,
        code -> Text,
        title -> Text,
        category -> Nullable<Text>,
        revision -> Integer,
        file_path -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    form_submissions (id) {
        id -> Text,
        template_id -> Text,
        crew_id -> Nullable<Text>,
        submitted_by -> Text,
        data_json -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    risk_opportunities (id) {
        id -> Text,
        kind -> Text,
        source -> Text,
        description -> Text,
        likelihood -> Nullable<Text>,
        impact -> Nullable<Text>,
        risk_score -> Nullable<Integer>,
        actions -> Text,
        responsible_person -> Nullable<Text>,
        target_date -> Nullable<Timestamp>,
        residual_risk -> Nullable<Text>,
        status -> Text,
        created_by -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    corrective_actions (id) {
        id -> Text,
        car_number -> Text,
        source -> Text,
        problem_description -> Text,
        detected_date -> Timestamp,
        detected_by -> Text,
        root_cause -> Nullable<Text>,
        category -> Nullable<Text>,
        proposed_action -> Nullable<Text>,
        responsible_person -> Nullable<Text>,
        target_date -> Nullable<Timestamp>,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    audits (id) {
        id -> Text,
        audit_number -> Text,
        audit_type -> Text,
        scope -> Text,
        auditor -> Text,
        planned_date -> Nullable<Timestamp>,
        conducted_date -> Nullable<Timestamp>,
        findings -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    suppliers (id) {
        id -> Text,
        name -> Text,
        service_type -> Text,
        contact -> Nullable<Text>,
        email -> Nullable<Text>,
        evaluation_score -> Nullable<Integer>,
        approved -> Bool,
        remarks -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    complaints (id) {
        id -> Text,
        complaint_number -> Text,
        source -> Text,
        description -> Text,
        received_date -> Timestamp,
        received_by -> Text,
        severity -> Nullable<Text>,
        resolution -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    crew_evaluations (id) {
        id -> Text,
        crew_id -> Text,
        evaluator -> Nullable<Text>,
        rank -> Nullable<Text>,
        score -> Nullable<Double>,
        comments -> Nullable<Text>,
        evaluation_date -> Timestamp,
        created_at -> Timestamp,
    }
}

diesel::table! {
    repatriations (id) {
        id -> Text,
        crew_id -> Text,
        repatriation_date -> Nullable<Timestamp>,
        reason -> Nullable<Text>,
        final_account -> Nullable<Double>,
        processed_by -> Nullable<Text>,
        remarks -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    sea_service_records (id) {
        id -> Text,
        crew_id -> Text,
        vessel_name -> Text,
        rank -> Nullable<Text>,
        grt -> Nullable<Double>,
        dwt -> Nullable<Double>,
        engine_type -> Nullable<Text>,
        bhp -> Nullable<Double>,
        company_name -> Nullable<Text>,
        flag -> Nullable<Text>,
        sign_on -> Nullable<Timestamp>,
        sign_off -> Nullable<Timestamp>,
        remarks -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(vessels -> owners (owner_id));
diesel::joinable!(assignments -> crew (crew_id));
diesel::joinable!(assignments -> vessels (vessel_id));
diesel::joinable!(certificates -> crew (crew_id));
diesel::joinable!(crew_evaluations -> crew (crew_id));
diesel::joinable!(repatriations -> crew (crew_id));
diesel::joinable!(sea_service_records -> crew (crew_id));
diesel::joinable!(employment_applications -> crew (crew_id));
diesel::joinable!(checklists -> crew (crew_id));
diesel::joinable!(checklists -> employment_applications (application_id));
diesel::joinable!(document_revisions -> managed_documents (document_id));
diesel::joinable!(document_approvals -> managed_documents (document_id));
diesel::joinable!(document_distributions -> managed_documents (document_id));
diesel::joinable!(form_submissions -> form_templates (template_id));
diesel::joinable!(form_submissions -> crew (crew_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    sessions,
    owners,
    vessels,
    crew,
    assignments,
    certificates,
    crew_evaluations,
    repatriations,
    sea_service_records,
    employment_applications,
    checklists,
    managed_documents,
    document_revisions,
    document_approvals,
    document_distributions,
    form_templates,
    form_submissions,
    risk_opportunities,
    corrective_actions,
    audits,
    suppliers,
    complaints,
);
