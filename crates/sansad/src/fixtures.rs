//! Synthetic tracker pages shared by the unit tests.

const FILLER: &str = "<p>Lorem ipsum dolor sit amet, consectetur adipiscing elit.</p>";

pub fn pad(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Tracker</title></head><body>{}{}</body></html>",
        body,
        FILLER.repeat(10)
    )
}

fn slug(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

pub fn mp_profile(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{name} | MP Track | PRS Legislative Research</title></head>
<body class="mptrack mp-profile">
  <div class="mp-profile-header">
    <div class="member-image"><img src="/files/mp/{slug}.jpg" alt="{name}"></div>
    <div class="mp-name"><h1>{name}</h1></div>
    <div class="member-state"><span class="field-label">State</span><span class="field-item">Uttar Pradesh</span></div>
    <div class="mp-constituency"><span class="field-label">Constituency</span><span class="field-item">Rae Bareli</span></div>
    <div class="member-party"><span class="field-label">Party</span><span class="field-item">Indian National Congress</span></div>
    <div class="term-start"><span class="field-item">04-Jun-2024</span></div>
    <div class="term-end"><span class="field-item">In Office</span></div>
    <div class="no-of-terms"><span class="field-item">5</span></div>
    <div class="member-age"><span class="field-item">54</span></div>
    <div class="member-gender"><span class="field-item">Male</span></div>
    <div class="member-education"><span class="field-item">Post Graduate</span></div>
  </div>
  <section class="mp-performance">
    <div class="attendance-block">
      <h3>Attendance</h3>
      <span class="member-value">51%</span>
      <span class="national-value">87%</span>
      <span class="state-value">88%</span>
    </div>
    <div class="debates-block">
      <h3>Debates</h3>
      <div class="metric-item">7</div>
      <div class="metric-item">29.4</div>
      <div class="metric-item">21.6</div>
    </div>
    <div class="questions-block">
      <h3>Questions</h3>
      <p><span>Selected MP</span><span>12</span></p>
      <p><span>National Average</span><span>63.1</span></p>
      <p>State Average: 58.2</p>
    </div>
    <div class="pmb-block">
      <h3>Private Member Bills</h3>
      <span class="member-value">1</span>
      <span class="national-value">0.9</span>
      <span class="state-value">0.4</span>
    </div>
  </section>
  <section class="mp-activity">
    <div id="attendance-table">
      <table>
        <thead><tr><th>Session</th><th>Attendance</th></tr></thead>
        <tbody><tr><td>Budget Session 2024</td><td>51%</td></tr></tbody>
      </table>
    </div>
  </section>
  <section class="mp-debates">
    <h2>Debates</h2>
    <table>
      <tr><th>Date</th><th>Title</th><th>Type</th></tr>
      <tr><td>02.07.2024</td><td>Motion of Thanks on the President's Address</td><td>Discussion</td></tr>
    </table>
  </section>
  <div class="listing">
    <table>
      <thead><tr><th>Date</th><th>Title</th><th>Type</th><th>Ministry</th></tr></thead>
      <tbody><tr><td>26.07.2024</td><td>Safety of passenger trains</td><td>Starred</td><td>Ministry of Railways</td></tr></tbody>
    </table>
  </div>
</body>
</html>"#,
        name = name,
        slug = slug(name),
    )
}

pub fn mla_profile(name: &str) -> String {
    pad(&format!(
        r#"<div class="mlatrack mla-profile">
  <p>Member of the Delhi Legislative Assembly</p>
  <div class="member-image"><img src="https://prsindia.org/files/mla/{slug}.jpg"></div>
  <div class="mla-name"><h1>{name}</h1></div>
  <div class="member-state"><span class="field-item">Delhi</span></div>
  <div class="mla-constituency"><span class="field-item">Kalkaji</span></div>
  <div class="member-party"><span class="field-item">Aam Aadmi Party</span></div>
</div>"#,
        name = name,
        slug = slug(name),
    ))
}

pub fn mla_profile_without_data(name: &str) -> String {
    pad(&format!(
        r#"<div class="mlatrack mla-profile">
  <div class="mla-name"><h1>{name}</h1></div>
  <div class="alert">Data not available for this member.</div>
</div>"#
    ))
}

/// Passes the MP validator but carries no member name.
pub fn placeholder_profile() -> String {
    pad(r#"<div class="mptrack"><h3>Attendance</h3><p>Loading…</p></div>"#)
}

pub fn not_found_page() -> String {
    pad("<h1>Page not found</h1><p>The requested page could not be found.</p>")
}
